use crate::batch::types::{InspectionOutcome, InspectionRequest};
use async_trait::async_trait;

/// Performs one remote inspection of a single URL
///
/// Implementations are expected to turn every request-level problem (HTTP
/// errors, malformed responses, expired credentials after one refresh) into an
/// [`InspectionOutcome::Failure`]. `Err` is reserved for unexpected faults; the
/// scheduler still records those as failures so the batch completes.
#[async_trait]
pub trait Inspector: Send + Sync {
    async fn inspect(&self, request: &InspectionRequest) -> crate::Result<InspectionOutcome>;
}
