//! Run reporting: per-case outcomes, annotations, and the suite summary.

use crate::driver::TranslationResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Terminal state of one test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseStatus {
    /// Assertion held or was skipped (empty input)
    Passed,
    /// Setup, timeout, or assertion failure
    Failed,
}

impl CaseStatus {
    /// Check if status is passing
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Why a case failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Expected input control not visible, or page plumbing broke
    Setup,
    /// Output never became non-empty and stable within the bound
    Timeout,
    /// Non-empty input produced empty/whitespace output
    Assertion,
}

/// A named annotation attached to the run report, one per case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation kind
    pub kind: String,
    /// Free-form description
    pub description: String,
}

impl Annotation {
    /// Annotation carrying a case's captured translation
    #[must_use]
    pub fn translation_result(case_type: &str, input: &str, output: &str) -> Self {
        Self {
            kind: "Translation Result".to_string(),
            description: format!("Type: {case_type} | Input: {input} | Output: {output}"),
        }
    }
}

/// Result entry for one executed (or attempted) test case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseOutcome {
    /// Fixture case id
    pub case_id: u32,
    /// Fixture case type
    pub case_type: String,
    /// Human-readable case label
    pub label: String,
    /// Case status
    pub status: CaseStatus,
    /// Failure classification, if failed
    pub failure: Option<FailureKind>,
    /// Error message, if failed
    pub error: Option<String>,
    /// Input text
    pub input: String,
    /// Captured output text (empty when the case failed before extraction)
    pub output: String,
    /// How long the output took to stabilize
    pub elapsed_wait_ms: u64,
    /// Total case duration
    pub duration: Duration,
    /// Report annotation for this case
    pub annotation: Annotation,
}

impl CaseOutcome {
    /// Build a passing outcome from a captured translation
    #[must_use]
    pub fn passed(
        case_type: &str,
        label: impl Into<String>,
        result: &TranslationResult,
        duration: Duration,
    ) -> Self {
        Self {
            case_id: result.case_id,
            case_type: case_type.to_string(),
            label: label.into(),
            status: CaseStatus::Passed,
            failure: None,
            error: None,
            input: result.input.clone(),
            output: result.output.clone(),
            elapsed_wait_ms: result.elapsed_wait_ms,
            duration,
            annotation: Annotation::translation_result(case_type, &result.input, &result.output),
        }
    }

    /// Build a failing outcome
    #[must_use]
    pub fn failed(
        case_id: u32,
        case_type: &str,
        label: impl Into<String>,
        input: &str,
        output: &str,
        failure: FailureKind,
        error: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            case_id,
            case_type: case_type.to_string(),
            label: label.into(),
            status: CaseStatus::Failed,
            failure: Some(failure),
            error: Some(error.into()),
            input: input.to_string(),
            output: output.to_string(),
            elapsed_wait_ms: 0,
            duration,
            annotation: Annotation::translation_result(case_type, input, output),
        }
    }

    /// Log the structured per-case record
    pub fn log(&self) {
        tracing::info!("--------------------------------------------------");
        tracing::info!("Test Case: {}", self.case_id);
        tracing::info!("Type: {}", self.case_type);
        tracing::info!("Input (Singlish): {}", self.input);
        tracing::info!("Output (Sinhala): {}", self.output);
        if let Some(ref error) = self.error {
            tracing::info!("Failure: {error}");
        }
        tracing::info!("--------------------------------------------------");
    }
}

/// Aggregated results of one suite run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Per-case outcomes, fixture order preserved
    pub outcomes: Vec<CaseOutcome>,
    /// Total run duration
    pub duration: Duration,
}

impl RunReport {
    /// Create an empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a case outcome
    pub fn record(&mut self, outcome: CaseOutcome) {
        self.outcomes.push(outcome);
    }

    /// Check if every case passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.status.is_passed())
    }

    /// Count passed cases
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status.is_passed())
            .count()
    }

    /// Count failed cases
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.passed_count()
    }

    /// Failed cases
    #[must_use]
    pub fn failures(&self) -> Vec<&CaseOutcome> {
        self.outcomes
            .iter()
            .filter(|o| !o.status.is_passed())
            .collect()
    }

    /// Serialize the report as pretty JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> TranslationResult {
        TranslationResult {
            case_id: 1,
            input: "mama gedara yanawa".to_string(),
            output: "මම ගෙදර යනවා".to_string(),
            elapsed_wait_ms: 420,
        }
    }

    #[test]
    fn test_annotation_format_matches_report_contract() {
        let annotation = Annotation::translation_result("basic", "mama", "මම");
        assert_eq!(annotation.kind, "Translation Result");
        assert_eq!(annotation.description, "Type: basic | Input: mama | Output: මම");
    }

    #[test]
    fn test_passed_outcome_carries_translation() {
        let outcome = CaseOutcome::passed(
            "basic",
            "Test Case 1 [BASIC]",
            &sample_result(),
            Duration::from_millis(900),
        );
        assert!(outcome.status.is_passed());
        assert!(outcome.failure.is_none());
        assert_eq!(outcome.output, "මම ගෙදර යනවා");
        assert_eq!(outcome.elapsed_wait_ms, 420);
    }

    #[test]
    fn test_failed_outcome_keeps_context_for_diagnosis() {
        let outcome = CaseOutcome::failed(
            4,
            "basic",
            "Test Case 4 [BASIC]",
            "api yamu",
            "",
            FailureKind::Timeout,
            "Translation output did not appear within 10000ms",
            Duration::from_secs(10),
        );
        assert!(!outcome.status.is_passed());
        assert_eq!(outcome.failure, Some(FailureKind::Timeout));
        assert_eq!(outcome.input, "api yamu");
        assert!(outcome.error.as_deref().unwrap().contains("10000ms"));
    }

    #[test]
    fn test_report_counts_and_failures() {
        let mut report = RunReport::new();
        report.record(CaseOutcome::passed(
            "basic",
            "case 1",
            &sample_result(),
            Duration::from_millis(10),
        ));
        report.record(CaseOutcome::failed(
            2,
            "edge",
            "case 2",
            "x",
            "",
            FailureKind::Assertion,
            "empty output",
            Duration::from_millis(10),
        ));

        assert!(!report.all_passed());
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.failures()[0].case_id, 2);
    }

    #[test]
    fn test_report_json_round_trip() {
        let mut report = RunReport::new();
        report.record(CaseOutcome::passed(
            "basic",
            "case 1",
            &sample_result(),
            Duration::from_millis(10),
        ));
        let json = report.to_json().unwrap();
        let back: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.outcomes.len(), 1);
        assert_eq!(back.outcomes[0].case_id, 1);
    }
}
