//! Tri-state indexing verdicts derived from inspection outcomes

use crate::batch::types::{IndexStatus, InspectionOutcome};
use serde::Serialize;

/// Verdict the API reports for an indexed page
pub const INDEXED_VERDICT: &str = "PASS";

/// Coverage state the API reports for an indexed page
pub const INDEXED_COVERAGE_STATE: &str = "Submitted and indexed";

/// Category every outcome falls into for tallying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexCategory {
    Indexed,
    NotIndexed,
    Error,
}

impl IndexCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Indexed => "Indexed",
            Self::NotIndexed => "Not indexed",
            Self::Error => "Error",
        }
    }
}

/// Classifies an outcome
///
/// Failures are always `Error`. Successes are `Indexed` when the verdict is
/// `PASS` or the coverage state is "Submitted and indexed", and `NotIndexed`
/// otherwise, including unknown or missing verdicts.
pub fn classify(outcome: &InspectionOutcome) -> IndexCategory {
    match outcome {
        InspectionOutcome::Success(result) => classify_index_status(&result.index_status),
        InspectionOutcome::Failure { .. } => IndexCategory::Error,
    }
}

/// Classifies a successful inspection's index status
pub fn classify_index_status(status: &IndexStatus) -> IndexCategory {
    if is_indexed(status) {
        IndexCategory::Indexed
    } else {
        IndexCategory::NotIndexed
    }
}

fn is_indexed(status: &IndexStatus) -> bool {
    status.verdict.as_deref() == Some(INDEXED_VERDICT)
        || status.coverage_state.as_deref() == Some(INDEXED_COVERAGE_STATE)
}

/// Badge shown next to a row in the results table
///
/// Unlike [`IndexCategory`], a success with a verdict other than NEUTRAL or
/// FAIL (or none at all) is shown as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    Indexed,
    NotIndexed,
    Unknown,
    Error,
}

impl StatusBadge {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Indexed => "Indexed",
            Self::NotIndexed => "Not indexed",
            Self::Unknown => "Unknown",
            Self::Error => "Error",
        }
    }

    pub fn for_outcome(outcome: &InspectionOutcome) -> Self {
        match outcome {
            InspectionOutcome::Failure { .. } => Self::Error,
            InspectionOutcome::Success(result) => {
                let status = &result.index_status;
                if is_indexed(status) {
                    Self::Indexed
                } else {
                    match status.verdict.as_deref() {
                        Some("NEUTRAL") | Some("FAIL") => Self::NotIndexed,
                        _ => Self::Unknown,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(verdict: Option<&str>, coverage: Option<&str>) -> IndexStatus {
        IndexStatus {
            verdict: verdict.map(str::to_string),
            coverage_state: coverage.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_pass_verdict_is_indexed() {
        let outcome = InspectionOutcome::success("https://x.test/", status(Some("PASS"), None));
        assert_eq!(classify(&outcome), IndexCategory::Indexed);
    }

    #[test]
    fn test_fail_verdict_is_not_indexed() {
        let outcome = InspectionOutcome::success(
            "https://y.test/",
            status(Some("FAIL"), Some("Crawled - currently not indexed")),
        );
        assert_eq!(classify(&outcome), IndexCategory::NotIndexed);
    }

    #[test]
    fn test_failure_is_error() {
        let outcome = InspectionOutcome::failure("https://z.test/", "HTTP 403");
        assert_eq!(classify(&outcome), IndexCategory::Error);
    }

    #[test]
    fn test_classifier_is_total_over_verdict_and_coverage() {
        let verdicts = [Some("PASS"), Some("FAIL"), Some("NEUTRAL"), Some("PARTIAL"), None];
        let coverages = [
            Some("Submitted and indexed"),
            Some("Discovered - currently not indexed"),
            None,
        ];

        for verdict in verdicts {
            for coverage in coverages {
                let category = classify_index_status(&status(verdict, coverage));
                let expect_indexed =
                    verdict == Some("PASS") || coverage == Some("Submitted and indexed");

                if expect_indexed {
                    assert_eq!(category, IndexCategory::Indexed, "{:?} {:?}", verdict, coverage);
                } else {
                    assert_eq!(
                        category,
                        IndexCategory::NotIndexed,
                        "{:?} {:?}",
                        verdict,
                        coverage
                    );
                }
            }
        }
    }

    #[test]
    fn test_coverage_state_alone_marks_indexed() {
        let category =
            classify_index_status(&status(Some("NEUTRAL"), Some("Submitted and indexed")));
        assert_eq!(category, IndexCategory::Indexed);
    }

    #[test]
    fn test_status_badges() {
        let neutral = InspectionOutcome::success("https://a.test/", status(Some("NEUTRAL"), None));
        let partial = InspectionOutcome::success("https://a.test/", status(Some("PARTIAL"), None));
        let missing = InspectionOutcome::success("https://a.test/", status(None, None));
        let pass = InspectionOutcome::success("https://a.test/", status(Some("PASS"), None));
        let failed = InspectionOutcome::failure("https://a.test/", "nope");

        assert_eq!(StatusBadge::for_outcome(&neutral), StatusBadge::NotIndexed);
        assert_eq!(StatusBadge::for_outcome(&partial), StatusBadge::Unknown);
        assert_eq!(StatusBadge::for_outcome(&missing), StatusBadge::Unknown);
        assert_eq!(StatusBadge::for_outcome(&pass), StatusBadge::Indexed);
        assert_eq!(StatusBadge::for_outcome(&failed), StatusBadge::Error);
    }
}
