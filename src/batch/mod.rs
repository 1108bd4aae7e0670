//! Batch inspection module
//!
//! This module contains the core of indexscope:
//! - Inspection request and outcome types
//! - The inspector interface the scheduler drives
//! - Outcome classification into indexed / not indexed / error
//! - Running tallies and progress reporting
//! - The bounded-concurrency batch scheduler

mod classifier;
mod inspector;
mod progress;
mod scheduler;
mod types;

pub use classifier::{
    classify, classify_index_status, IndexCategory, StatusBadge, INDEXED_COVERAGE_STATE,
    INDEXED_VERDICT,
};
pub use inspector::Inspector;
pub use progress::{LogProgress, NoProgress, ProgressSink, ProgressUpdate, Tallies};
pub use scheduler::{inspect_batch, BatchError, BatchRequest, BatchRun};
pub use types::{IndexStatus, InspectionOutcome, InspectionRequest, InspectionResult};
