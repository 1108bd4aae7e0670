//! JSON export of batch results

use crate::batch::{IndexStatus, InspectionOutcome};
use crate::output::OutputResult;
use serde::Serialize;
use serde_json::Value;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
#[serde(untagged)]
enum ExportRecord<'a> {
    Success {
        url: &'a str,
        success: bool,
        #[serde(rename = "indexStatusResult")]
        index_status_result: &'a IndexStatus,
        #[serde(rename = "ampResult", skip_serializing_if = "Option::is_none")]
        amp_result: Option<&'a Value>,
        #[serde(rename = "mobileUsabilityResult", skip_serializing_if = "Option::is_none")]
        mobile_usability_result: Option<&'a Value>,
        #[serde(rename = "richResultsResult", skip_serializing_if = "Option::is_none")]
        rich_results_result: Option<&'a Value>,
    },
    Failure {
        url: &'a str,
        success: bool,
        error: &'a str,
    },
}

impl<'a> From<&'a InspectionOutcome> for ExportRecord<'a> {
    fn from(outcome: &'a InspectionOutcome) -> Self {
        match outcome {
            InspectionOutcome::Success(result) => Self::Success {
                url: &result.url,
                success: true,
                index_status_result: &result.index_status,
                amp_result: result.amp_result.as_ref(),
                mobile_usability_result: result.mobile_usability_result.as_ref(),
                rich_results_result: result.rich_results_result.as_ref(),
            },
            InspectionOutcome::Failure { url, error_message } => Self::Failure {
                url,
                success: false,
                error: error_message,
            },
        }
    }
}

/// Serializes outcomes as a pretty-printed JSON array
pub fn to_json_string(outcomes: &[InspectionOutcome]) -> OutputResult<String> {
    let records: Vec<ExportRecord<'_>> = outcomes.iter().map(ExportRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Exports outcomes to a JSON file
///
/// # Returns
///
/// The number of records written. Nothing is written for an empty slice.
pub fn export_json(outcomes: &[InspectionOutcome], path: &Path) -> OutputResult<usize> {
    if outcomes.is_empty() {
        return Ok(0);
    }

    let json = to_json_string(outcomes)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    tracing::info!("Exported {} results to {}", outcomes.len(), path.display());
    Ok(outcomes.len())
}
