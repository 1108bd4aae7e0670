//! Output module for rendering and exporting inspection results
//!
//! This module handles:
//! - Rendering the results table and summary in the terminal
//! - Exporting results as CSV or JSON
//! - Choosing dated default file names for exports

mod csv;
mod json;
pub mod table;

pub use self::csv::{export_csv, write_csv};
pub use self::json::{export_json, to_json_string};
pub use table::{format_results_table, format_summary, print_results, truncate_url};

use crate::batch::BatchRun;
use crate::config::ExportFormat;
use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Default export file name for a given date
///
/// Format: `url-inspection-results-YYYY-MM-DD.<ext>`
pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "url-inspection-results-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Writes a run in one format to an explicit path
pub fn export_to(run: &BatchRun, format: ExportFormat, path: &Path) -> OutputResult<usize> {
    match format {
        ExportFormat::Csv => export_csv(&run.outcomes, path),
        ExportFormat::Json => export_json(&run.outcomes, path),
    }
}

/// Writes a run in each format under `directory`, using today's dated file names
///
/// # Returns
///
/// The paths that were written. Empty runs produce no files.
pub fn export_run(
    run: &BatchRun,
    formats: &[ExportFormat],
    directory: &Path,
) -> OutputResult<Vec<PathBuf>> {
    if run.outcomes.is_empty() || formats.is_empty() {
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(directory)?;
    let today = Utc::now().date_naive();

    let mut written = Vec::new();
    for format in formats {
        let path = directory.join(export_file_name(*format, today));
        export_to(run, *format, &path)?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 9).unwrap();
        assert_eq!(
            export_file_name(ExportFormat::Csv, date),
            "url-inspection-results-2024-07-09.csv"
        );
        assert_eq!(
            export_file_name(ExportFormat::Json, date),
            "url-inspection-results-2024-07-09.json"
        );
    }
}
