//! Per-step outcomes and script run reports.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Outcome status of a single step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    /// Step completed
    Passed,
    /// Step failed (assertion failure or hard error)
    Failed,
    /// Step not executed because an earlier step aborted the run
    Skipped,
}

/// Result of a single executed step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    /// Step description
    pub step: String,
    /// Outcome status
    pub status: StepStatus,
    /// Failure detail, if any
    pub detail: Option<String>,
    /// Step duration
    pub duration: Duration,
}

impl StepOutcome {
    /// Create a passing outcome
    #[must_use]
    pub fn pass(step: impl Into<String>, duration: Duration) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Passed,
            detail: None,
            duration,
        }
    }

    /// Create a failing outcome
    #[must_use]
    pub fn fail(step: impl Into<String>, detail: impl Into<String>, duration: Duration) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Failed,
            detail: Some(detail.into()),
            duration,
        }
    }

    /// Create a skipped outcome
    #[must_use]
    pub fn skip(step: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            status: StepStatus::Skipped,
            detail: None,
            duration: Duration::ZERO,
        }
    }

    /// Whether the step passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == StepStatus::Passed
    }
}

/// Report from running one verification script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptReport {
    /// Script name
    pub script: String,
    /// Per-step outcomes
    pub outcomes: Vec<StepOutcome>,
    /// Screenshot files written during the run
    pub screenshots: Vec<PathBuf>,
    /// Error that aborted the remaining steps, if any
    pub aborted: Option<String>,
    /// Total duration
    pub duration: Duration,
}

impl ScriptReport {
    /// Check whether every step passed and nothing aborted
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.aborted.is_none() && self.outcomes.iter().all(StepOutcome::passed)
    }

    /// Count passed steps
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    /// Count failed steps
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.status == StepStatus::Failed)
            .count()
    }

    /// Total step count
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Get failed outcomes
    #[must_use]
    pub fn failures(&self) -> Vec<&StepOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == StepStatus::Failed)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn sample_report() -> ScriptReport {
        ScriptReport {
            script: "homepage".to_string(),
            outcomes: vec![
                StepOutcome::pass("goto http://localhost:3000", Duration::from_millis(120)),
                StepOutcome::fail(
                    "expect text \"Connect Wallet\"",
                    "text \"Connect Wallet\" not visible",
                    Duration::from_millis(5),
                ),
                StepOutcome::skip("screenshot homepage.png"),
            ],
            screenshots: vec![],
            aborted: None,
            duration: Duration::from_millis(130),
        }
    }

    #[test]
    fn test_counts() {
        let report = sample_report();
        assert_eq!(report.total(), 3);
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_failures_lists_failed_only() {
        let report = sample_report();
        let failures = report.failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].detail.as_deref().unwrap().contains("Connect Wallet"));
    }

    #[test]
    fn test_all_passed() {
        let report = ScriptReport {
            script: "app-load".to_string(),
            outcomes: vec![StepOutcome::pass("goto", Duration::ZERO)],
            screenshots: vec![],
            aborted: None,
            duration: Duration::ZERO,
        };
        assert!(report.all_passed());
    }

    #[test]
    fn test_abort_fails_report() {
        let mut report = sample_report();
        report.aborted = Some("Navigation to http://localhost:3000 failed".to_string());
        assert!(!report.all_passed());
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = sample_report();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("homepage"));
        assert!(json.contains("Skipped"));
    }
}
