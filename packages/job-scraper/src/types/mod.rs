//! Data types flowing through the pipeline.

pub mod job;

pub use job::{generate_id, JobRecord, SourceKind, SALARY_NOT_SPECIFIED};
