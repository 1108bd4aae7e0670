//! Running tallies and the progress sink the scheduler reports into

use crate::batch::classifier::IndexCategory;
use crate::batch::types::InspectionOutcome;
use serde::Serialize;

/// Running per-category counts for a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tallies {
    pub processed: usize,
    pub indexed: usize,
    pub not_indexed: usize,
    pub errors: usize,
}

impl Tallies {
    /// Counts one more processed outcome in the given category
    pub fn record(&mut self, category: IndexCategory) {
        self.processed += 1;
        match category {
            IndexCategory::Indexed => self.indexed += 1,
            IndexCategory::NotIndexed => self.not_indexed += 1,
            IndexCategory::Error => self.errors += 1,
        }
    }

    /// True when every processed outcome landed in exactly one bucket
    pub fn is_consistent(&self) -> bool {
        self.processed == self.indexed + self.not_indexed + self.errors
    }
}

/// Snapshot handed to a [`ProgressSink`] after each outcome is recorded
#[derive(Debug)]
pub struct ProgressUpdate<'a> {
    /// The outcome that was just recorded
    pub outcome: &'a InspectionOutcome,

    /// Its category
    pub category: IndexCategory,

    /// Tallies including this outcome
    pub tallies: Tallies,

    /// Number of URLs in the batch
    pub total: usize,
}

impl ProgressUpdate<'_> {
    pub fn is_last(&self) -> bool {
        self.tallies.processed == self.total
    }
}

/// Receives one update per completed inspection
///
/// Called synchronously from the scheduler between recording an outcome and
/// refilling the freed slot, so implementations must not block.
pub trait ProgressSink {
    fn on_progress(&mut self, update: &ProgressUpdate<'_>);
}

impl<F> ProgressSink for F
where
    F: FnMut(&ProgressUpdate<'_>),
{
    fn on_progress(&mut self, update: &ProgressUpdate<'_>) {
        self(update)
    }
}

/// Sink that discards updates
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&mut self, _update: &ProgressUpdate<'_>) {}
}

/// Sink that reports progress through `tracing`
///
/// Every outcome is logged at debug level, failures at warn level, and a
/// summary line is written at info level every `report_every` outcomes and on
/// the last one.
#[derive(Debug)]
pub struct LogProgress {
    report_every: usize,
}

impl LogProgress {
    pub fn new(report_every: usize) -> Self {
        Self {
            report_every: report_every.max(1),
        }
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ProgressSink for LogProgress {
    fn on_progress(&mut self, update: &ProgressUpdate<'_>) {
        let tallies = update.tallies;

        match update.outcome.error_message() {
            Some(message) => {
                tracing::warn!("Inspection failed for {}: {}", update.outcome.url(), message)
            }
            None => tracing::debug!(
                "Inspected {}: {}",
                update.outcome.url(),
                update.category.label()
            ),
        }

        if tallies.processed % self.report_every == 0 || update.is_last() {
            tracing::info!(
                "Progress: {} / {} (indexed: {}, not indexed: {}, errors: {})",
                tallies.processed,
                update.total,
                tallies.indexed,
                tallies.not_indexed,
                tallies.errors
            );
        }
    }
}
