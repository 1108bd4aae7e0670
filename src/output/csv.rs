//! CSV export of batch results
//!
//! One row per outcome in completion order. Every cell is quoted.

use crate::batch::InspectionOutcome;
use crate::output::OutputResult;
use csv::{QuoteStyle, WriterBuilder};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const HEADERS: [&str; 8] = [
    "URL",
    "Status",
    "Verdict",
    "Coverage State",
    "Last Crawl",
    "Indexing State",
    "Robots.txt State",
    "Error",
];

fn cell(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn record(outcome: &InspectionOutcome) -> [&str; 8] {
    match outcome {
        InspectionOutcome::Failure { url, error_message } => [
            url.as_str(),
            "Error",
            "",
            "",
            "",
            "",
            "",
            error_message.as_str(),
        ],
        InspectionOutcome::Success(result) => {
            let status = &result.index_status;
            [
                result.url.as_str(),
                "Success",
                cell(&status.verdict),
                cell(&status.coverage_state),
                cell(&status.last_crawl_time),
                cell(&status.indexing_state),
                cell(&status.robots_txt_state),
                "",
            ]
        }
    }
}

/// Writes outcomes as CSV to any writer
pub fn write_csv<W: Write>(outcomes: &[InspectionOutcome], writer: W) -> OutputResult<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);

    writer.write_record(HEADERS)?;
    for outcome in outcomes {
        writer.write_record(record(outcome))?;
    }
    writer.flush()?;

    Ok(())
}

/// Exports outcomes to a CSV file
///
/// # Returns
///
/// The number of records written. Nothing is written for an empty slice.
pub fn export_csv(outcomes: &[InspectionOutcome], path: &Path) -> OutputResult<usize> {
    if outcomes.is_empty() {
        return Ok(0);
    }

    let file = File::create(path)?;
    write_csv(outcomes, file)?;

    tracing::info!("Exported {} results to {}", outcomes.len(), path.display());
    Ok(outcomes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::IndexStatus;

    #[test]
    fn test_csv_layout() {
        let outcomes = vec![
            InspectionOutcome::success(
                "https://a.test/",
                IndexStatus {
                    verdict: Some("PASS".to_string()),
                    coverage_state: Some("Submitted and indexed".to_string()),
                    robots_txt_state: Some("ALLOWED".to_string()),
                    ..Default::default()
                },
            ),
            InspectionOutcome::failure("https://b.test/", "Said \"no\""),
        ];

        let mut buffer = Vec::new();
        write_csv(&outcomes, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            r#""URL","Status","Verdict","Coverage State","Last Crawl","Indexing State","Robots.txt State","Error""#
        );
        assert_eq!(
            lines[1],
            r#""https://a.test/","Success","PASS","Submitted and indexed","","","ALLOWED","""#
        );
        assert_eq!(
            lines[2],
            r#""https://b.test/","Error","","","","","","Said ""no""""#
        );
    }

    #[test]
    fn test_empty_export_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        assert_eq!(export_csv(&[], &path).unwrap(), 0);
        assert!(!path.exists());
    }
}
