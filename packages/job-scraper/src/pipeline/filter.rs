//! Keyword-based content filter.

use crate::types::JobRecord;

/// Drops records whose description mentions an excluded term.
///
/// Matching is case-insensitive substring containment, not whole-word:
/// "hoteling" is excluded by "hotel". Empty terms are ignored.
#[derive(Debug, Clone, Default)]
pub struct ContentFilter {
    terms: Vec<String>,
}

impl ContentFilter {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// Lowercased terms in effect.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn excludes(&self, job: &JobRecord) -> bool {
        if self.terms.is_empty() {
            return false;
        }
        let description = job.description.to_lowercase();
        self.terms.iter().any(|term| description.contains(term.as_str()))
    }

    pub fn apply(&self, jobs: Vec<JobRecord>) -> Vec<JobRecord> {
        jobs.into_iter().filter(|job| !self.excludes(job)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::testing::record;
    use crate::types::SourceKind;

    fn default_filter() -> ContentFilter {
        ContentFilter::new(&SearchConfig::default().excluded_terms)
    }

    #[test]
    fn test_excludes_hotel_regardless_of_case() {
        let filter = default_filter();

        for description in [
            "Hotel Operations Associate",
            "HOTEL OPERATIONS ASSOCIATE",
            "hotel operations associate",
        ] {
            let job = record("https://x/1", SourceKind::Indeed, description);
            assert!(filter.excludes(&job), "{} should be excluded", description);
        }
    }

    #[test]
    fn test_retains_warehouse_associate() {
        let job = record("https://x/1", SourceKind::Indeed, "Warehouse Associate");
        assert!(!default_filter().excludes(&job));
    }

    #[test]
    fn test_substring_not_whole_word() {
        let job = record("https://x/1", SourceKind::Indeed, "Desk hoteling coordinator");
        assert!(default_filter().excludes(&job));
    }

    #[test]
    fn test_multi_word_term() {
        let job = record("https://x/1", SourceKind::Craigslist, "Seasonal Food Service crew");
        assert!(default_filter().excludes(&job));
    }

    #[test]
    fn test_blank_terms_do_not_exclude_everything() {
        let filter = ContentFilter::new(["", "   "]);

        assert!(filter.terms().is_empty());
        let job = record("https://x/1", SourceKind::Direct, "anything");
        assert!(!filter.excludes(&job));
    }

    #[test]
    fn test_apply_preserves_order() {
        let filter = ContentFilter::new(["restaurant"]);
        let jobs = vec![
            record("https://x/1", SourceKind::Indeed, "warehouse"),
            record("https://x/2", SourceKind::Indeed, "Restaurant host"),
            record("https://x/3", SourceKind::Direct, "retail"),
        ];

        let urls: Vec<String> = filter.apply(jobs).into_iter().map(|j| j.url).collect();

        assert_eq!(urls, vec!["https://x/1", "https://x/3"]);
    }
}
