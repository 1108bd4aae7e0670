//! Inspection request/outcome types shared by the scheduler, the API
//! transport, and the exporters.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single URL queued for inspection against a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionRequest {
    /// The URL being inspected
    pub url: String,

    /// The property (site identifier) that scopes the inspection
    pub site_url: String,
}

impl InspectionRequest {
    pub fn new(url: impl Into<String>, site_url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            site_url: site_url.into(),
        }
    }
}

/// Index status block returned by the URL Inspection API
///
/// Field names follow the API's camelCase JSON. Fields this crate does not
/// interpret are kept in `extra` so exports carry the full response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_state: Option<String>,

    /// RFC 3339 timestamp of the last crawl
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_crawl_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub robots_txt_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_fetch_state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_canonical: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_canonical: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawled_as: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Successful inspection of one URL
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectionResult {
    pub url: String,
    pub index_status: IndexStatus,
    pub amp_result: Option<Value>,
    pub mobile_usability_result: Option<Value>,
    pub rich_results_result: Option<Value>,
}

/// Outcome of inspecting one URL
///
/// Exactly one outcome is produced per request, and its URL is the request's
/// URL.
#[derive(Debug, Clone, PartialEq)]
pub enum InspectionOutcome {
    Success(InspectionResult),
    Failure { url: String, error_message: String },
}

impl InspectionOutcome {
    /// Builds a failure outcome
    pub fn failure(url: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self::Failure {
            url: url.into(),
            error_message: error_message.into(),
        }
    }

    /// Builds a success outcome carrying only an index status
    pub fn success(url: impl Into<String>, index_status: IndexStatus) -> Self {
        Self::Success(InspectionResult {
            url: url.into(),
            index_status,
            ..Default::default()
        })
    }

    /// The inspected URL
    pub fn url(&self) -> &str {
        match self {
            Self::Success(result) => &result.url,
            Self::Failure { url, .. } => url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Index status for successful inspections
    pub fn index_status(&self) -> Option<&IndexStatus> {
        match self {
            Self::Success(result) => Some(&result.index_status),
            Self::Failure { .. } => None,
        }
    }

    /// Error message for failed inspections
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure { error_message, .. } => Some(error_message),
        }
    }

    /// Replaces the outcome's URL
    pub(crate) fn set_url(&mut self, new_url: String) {
        match self {
            Self::Success(result) => result.url = new_url,
            Self::Failure { url, .. } => *url = new_url,
        }
    }
}
