//! Terminal rendering of batch results
//!
//! This module renders the results table (one row per outcome, in the order
//! outcomes arrived) and the summary block printed after a batch.

use crate::api::property_link;
use crate::batch::{BatchRun, InspectionOutcome, StatusBadge, Tallies};
use chrono::DateTime;

/// URLs longer than this are shortened in the table
pub const MAX_URL_WIDTH: usize = 60;

const HEADERS: [&str; 6] = [
    "URL",
    "Status",
    "Verdict",
    "Coverage State",
    "Last Crawl",
    "Indexing State",
];

/// Shortens a URL to at most `max` characters, ending in "..." when cut
pub fn truncate_url(url: &str, max: usize) -> String {
    if url.chars().count() <= max {
        return url.to_string();
    }

    let keep = max.saturating_sub(3);
    let mut truncated: String = url.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

/// Formats an RFC 3339 crawl time as a calendar date
pub fn format_crawl_date(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

fn row_cells(outcome: &InspectionOutcome) -> [String; 6] {
    let url = truncate_url(outcome.url(), MAX_URL_WIDTH);
    let badge = StatusBadge::for_outcome(outcome).label().to_string();

    match outcome {
        InspectionOutcome::Failure { error_message, .. } => [
            url,
            badge,
            String::new(),
            error_message.clone(),
            String::new(),
            String::new(),
        ],
        InspectionOutcome::Success(result) => {
            let status = &result.index_status;
            let or_na = |value: &Option<String>| value.clone().unwrap_or_else(|| "N/A".to_string());

            [
                url,
                badge,
                status.verdict.clone().unwrap_or_else(|| "UNKNOWN".to_string()),
                or_na(&status.coverage_state),
                status
                    .last_crawl_time
                    .as_deref()
                    .map(format_crawl_date)
                    .unwrap_or_else(|| "N/A".to_string()),
                or_na(&status.indexing_state),
            ]
        }
    }
}

/// Formats the results table
///
/// Failures show their error message in the Coverage State column.
pub fn format_results_table(outcomes: &[InspectionOutcome]) -> String {
    let rows: Vec<[String; 6]> = outcomes.iter().map(row_cells).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut table = String::new();
    push_row(&mut table, &HEADERS.map(str::to_string), &widths);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    table.push_str(&rule.join("-+-"));
    table.push('\n');

    for row in &rows {
        push_row(&mut table, row, &widths);
    }

    table
}

fn push_row(table: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    table.push_str(padded.join(" | ").trim_end());
    table.push('\n');
}

/// Formats the summary block for a finished batch
pub fn format_summary(run: &BatchRun) -> String {
    let Tallies {
        processed,
        indexed,
        not_indexed,
        errors,
    } = run.tallies;

    let percent = |count: usize| {
        if processed > 0 {
            (count as f64 / processed as f64) * 100.0
        } else {
            0.0
        }
    };

    let mut summary = String::new();
    summary.push_str("=== Inspection Summary ===\n\n");
    summary.push_str(&format!("Property: {}\n", run.site_url));
    summary.push_str(&format!("Total: {} / {}\n", processed, run.total));
    summary.push_str(&format!("  Indexed: {} ({:.1}%)\n", indexed, percent(indexed)));
    summary.push_str(&format!(
        "  Not indexed: {} ({:.1}%)\n",
        not_indexed,
        percent(not_indexed)
    ));
    summary.push_str(&format!("  Errors: {} ({:.1}%)\n", errors, percent(errors)));
    if let Some(seconds) = run.duration_seconds() {
        summary.push_str(&format!("Duration: {:.1}s\n", seconds));
    }
    summary.push_str(&format!("Open in Search Console: {}\n", property_link(&run.site_url)));
    summary
}

/// Prints the results table and summary to stdout
pub fn print_results(run: &BatchRun, show_table: bool) {
    if show_table && !run.outcomes.is_empty() {
        println!("{}", format_results_table(&run.outcomes));
    }
    print!("{}", format_summary(run));
}
