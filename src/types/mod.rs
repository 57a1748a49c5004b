// ABOUTME: Validated domain types shared across the toolkit.
// ABOUTME: Worker name validation and version-tag classification.

mod tag;
mod worker_name;

pub use tag::Tag;
pub use worker_name::{WorkerName, WorkerNameError};
