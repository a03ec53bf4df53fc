//! `jobboard-jobs` — job posting domain entity.

pub mod job;

pub use job::{Job, JobUpdate};
