//! Bounded-concurrency batch scheduler
//!
//! This module drives one inspection call per URL through a fixed-size window:
//! - Admission is strictly in input order
//! - At most `concurrency` calls are outstanding at any time
//! - Outcomes are recorded in completion order
//! - The sink is notified once per outcome, before the freed slot is refilled
//!
//! All outstanding calls are polled from the task that runs the batch, so the
//! cursor, the result sequence and the tallies have a single owner and need
//! no locking.

use crate::batch::classifier::{classify, IndexCategory};
use crate::batch::inspector::Inspector;
use crate::batch::progress::{ProgressSink, ProgressUpdate, Tallies};
use crate::batch::types::{InspectionOutcome, InspectionRequest};
use crate::config::{InspectionConfig, DEFAULT_CONCURRENCY, MAX_BATCH_SIZE};
use chrono::{DateTime, Utc};
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use thiserror::Error;

/// Reasons a batch is refused before any request is sent
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("No property selected")]
    MissingSite,

    #[error("No valid URLs to inspect")]
    EmptyBatch,

    #[error("Maximum {max} URLs per request, got {count}. Please reduce the number of URLs.")]
    TooManyUrls { count: usize, max: usize },

    #[error("Concurrency must be at least 1, got {0}")]
    InvalidConcurrency(usize),
}

/// Input to [`inspect_batch`]
#[derive(Debug, Clone)]
pub struct BatchRequest {
    /// URLs in admission order
    pub urls: Vec<String>,

    /// Property the URLs are inspected against
    pub site_url: String,

    /// Maximum outstanding inspection calls
    pub concurrency: usize,

    /// Largest accepted batch
    pub max_batch_size: usize,
}

impl BatchRequest {
    /// Creates a request with the default concurrency and batch cap
    pub fn new(urls: Vec<String>, site_url: impl Into<String>) -> Self {
        Self {
            urls,
            site_url: site_url.into(),
            concurrency: DEFAULT_CONCURRENCY,
            max_batch_size: MAX_BATCH_SIZE,
        }
    }

    /// Applies the limits from the `[inspection]` config section
    pub fn with_limits(mut self, config: &InspectionConfig) -> Self {
        self.concurrency = config.concurrency;
        self.max_batch_size = config.max_batch_size.min(MAX_BATCH_SIZE);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Checks the request without starting it
    pub fn validate(&self) -> Result<(), BatchError> {
        if self.site_url.trim().is_empty() {
            return Err(BatchError::MissingSite);
        }

        if self.urls.is_empty() {
            return Err(BatchError::EmptyBatch);
        }

        let max = self.max_batch_size.min(MAX_BATCH_SIZE);
        if self.urls.len() > max {
            return Err(BatchError::TooManyUrls {
                count: self.urls.len(),
                max,
            });
        }

        if self.concurrency == 0 {
            return Err(BatchError::InvalidConcurrency(self.concurrency));
        }

        Ok(())
    }
}

/// Results of one batch
#[derive(Debug, Clone)]
pub struct BatchRun {
    /// Property the batch was run against
    pub site_url: String,

    /// Outcomes in completion order
    pub outcomes: Vec<InspectionOutcome>,

    /// Final counts
    pub tallies: Tallies,

    /// Number of URLs in the batch
    pub total: usize,

    /// Highest number of calls that were outstanding at once
    pub peak_outstanding: usize,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BatchRun {
    fn new(site_url: String, total: usize) -> Self {
        Self {
            site_url,
            outcomes: Vec::with_capacity(total),
            tallies: Tallies::default(),
            total,
            peak_outstanding: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Records an outcome and returns its category
    fn record(&mut self, outcome: InspectionOutcome) -> IndexCategory {
        let category = classify(&outcome);
        self.tallies.record(category);
        self.outcomes.push(outcome);
        category
    }

    /// True once every URL has an outcome
    pub fn is_complete(&self) -> bool {
        self.tallies.processed == self.total
    }

    /// Wall-clock duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<f64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_milliseconds() as f64 / 1000.0)
    }
}

/// Inspects every URL in the request with bounded concurrency
///
/// The returned future resolves once every URL has exactly one outcome. An
/// inspector that returns `Err` or panics does not abort the batch: the URL is
/// recorded as a failure with an "Unexpected error" message and counted in
/// `errors`.
///
/// # Arguments
///
/// * `request` - URLs, property, and limits
/// * `inspector` - Performs one remote inspection per URL
/// * `sink` - Notified after each outcome is recorded
///
/// # Returns
///
/// * `Ok(BatchRun)` - Every URL was accounted for
/// * `Err(BatchError)` - The request was refused; no inspector call was made
///
/// # Example
///
/// ```no_run
/// use indexscope::batch::{inspect_batch, BatchRequest, Inspector, LogProgress};
///
/// # async fn example(inspector: &dyn Inspector) -> Result<(), indexscope::batch::BatchError> {
/// let request = BatchRequest::new(
///     vec!["https://example.com/".to_string()],
///     "sc-domain:example.com",
/// );
/// let run = inspect_batch(request, inspector, &mut LogProgress::default()).await?;
/// println!("{} indexed", run.tallies.indexed);
/// # Ok(())
/// # }
/// ```
pub async fn inspect_batch(
    request: BatchRequest,
    inspector: &dyn Inspector,
    sink: &mut dyn ProgressSink,
) -> Result<BatchRun, BatchError> {
    request.validate()?;

    let BatchRequest {
        urls,
        site_url,
        concurrency,
        ..
    } = request;

    let total = urls.len();
    let mut run = BatchRun::new(site_url.clone(), total);
    let mut queue = urls.into_iter();
    let mut outstanding = FuturesUnordered::new();

    tracing::info!(
        "Inspecting {} URLs for {} with concurrency {}",
        total,
        site_url,
        concurrency
    );

    loop {
        // Fill free slots in input order
        while outstanding.len() < concurrency {
            let Some(url) = queue.next() else {
                break;
            };
            let inspection = InspectionRequest::new(url, site_url.clone());
            outstanding.push(dispatch(inspector, inspection));
        }
        run.peak_outstanding = run.peak_outstanding.max(outstanding.len());

        let Some((inspection, result)) = outstanding.next().await else {
            break;
        };

        let outcome = settle(inspection, result);
        let category = run.record(outcome);

        if let Some(outcome) = run.outcomes.last() {
            sink.on_progress(&ProgressUpdate {
                outcome,
                category,
                tallies: run.tallies,
                total,
            });
        }
    }

    run.finished_at = Some(Utc::now());
    debug_assert!(run.is_complete());
    debug_assert!(run.tallies.is_consistent());

    tracing::info!(
        "Batch complete: {} processed, {} indexed, {} not indexed, {} errors",
        run.tallies.processed,
        run.tallies.indexed,
        run.tallies.not_indexed,
        run.tallies.errors
    );

    Ok(run)
}

type DispatchResult = Result<crate::Result<InspectionOutcome>, Box<dyn Any + Send>>;

/// Runs one inspection, capturing panics so the slot is always released
async fn dispatch(
    inspector: &dyn Inspector,
    request: InspectionRequest,
) -> (InspectionRequest, DispatchResult) {
    let result = AssertUnwindSafe(inspector.inspect(&request))
        .catch_unwind()
        .await;
    (request, result)
}

/// Turns a settled call into the outcome recorded for its request
fn settle(request: InspectionRequest, result: DispatchResult) -> InspectionOutcome {
    match result {
        Ok(Ok(mut outcome)) => {
            if outcome.url() != request.url {
                tracing::warn!(
                    "Inspector answered for {} while inspecting {}; keeping the requested URL",
                    outcome.url(),
                    request.url
                );
                outcome.set_url(request.url);
            }
            outcome
        }
        Ok(Err(e)) => {
            tracing::error!("Unexpected error inspecting {}: {}", request.url, e);
            InspectionOutcome::failure(request.url, format!("Unexpected error: {}", e))
        }
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            tracing::error!("Inspector panicked on {}: {}", request.url, message);
            InspectionOutcome::failure(request.url, format!("Unexpected error: {}", message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "inspector panicked".to_string()
    }
}
