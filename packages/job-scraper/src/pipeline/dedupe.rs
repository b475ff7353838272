//! URL-keyed deduplication.

use indexmap::IndexMap;

use crate::types::JobRecord;

/// Keep one record per URL: the first one seen.
///
/// Later records with the same URL are discarded whatever their other
/// fields say, so aggregation order decides which source wins.
pub fn dedupe_by_url(jobs: Vec<JobRecord>) -> Vec<JobRecord> {
    let mut unique: IndexMap<String, JobRecord> = IndexMap::with_capacity(jobs.len());

    for job in jobs {
        unique.entry(job.url.clone()).or_insert(job);
    }

    unique.into_values().collect()
}
