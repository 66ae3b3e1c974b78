//! Check orchestration.
//!
//! Runs each check in its own browser session, one after another. A check
//! that errors is reported and the run moves on; nothing here raises past
//! the summary. The strict/non-strict exit decision belongs to `main`.

use crate::config::CliConfig;
use crate::output::ProgressReporter;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};
use verificar::{BrowserConfig, RunnerConfig, ScriptReport, VerifyRunner, VerifyScript, WaitOptions};

/// A check that errored before producing a report
#[derive(Debug, Clone, Serialize)]
pub struct CheckError {
    /// Check name
    pub name: String,
    /// Opaque error string
    pub error: String,
}

/// Aggregated results of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// When the run finished
    pub generated_at: DateTime<Utc>,
    /// Reports from checks that ran to completion
    pub reports: Vec<ScriptReport>,
    /// Checks that errored (browser launch, page failure)
    pub errors: Vec<CheckError>,
    /// Total wall-clock duration
    pub duration: Duration,
}

impl RunSummary {
    /// Count checks whose every step passed
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.reports.iter().filter(|r| r.all_passed()).count()
    }

    /// Count checks that failed or errored
    #[must_use]
    pub fn failed_count(&self) -> usize {
        let failed_reports = self.reports.iter().filter(|r| !r.all_passed()).count();
        failed_reports + self.errors.len()
    }

    /// Check whether the whole run passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.errors.is_empty() && self.reports.iter().all(ScriptReport::all_passed)
    }
}

/// Runs a list of verification scripts and reports progress
#[derive(Debug)]
pub struct CheckRunner {
    config: CliConfig,
    reporter: ProgressReporter,
}

impl CheckRunner {
    /// Create a new check runner
    #[must_use]
    pub fn new(config: CliConfig) -> Self {
        let reporter = ProgressReporter::new(
            config.color.should_color(),
            config.verbosity.is_quiet(),
        );
        Self { config, reporter }
    }

    fn runner_config(&self) -> RunnerConfig {
        let mut browser = BrowserConfig::default().with_headless(self.config.headless);
        if let Some(ref path) = self.config.chromium_path {
            browser = browser.with_chromium_path(path.clone());
        }
        RunnerConfig::new()
            .with_browser(browser)
            .with_artifact_dir(self.config.artifact_dir.clone())
            .with_wait(WaitOptions::new().with_timeout(self.config.timeout_ms))
    }

    /// Run all scripts sequentially, swallowing per-check errors
    pub async fn run(&mut self, scripts: &[VerifyScript]) -> RunSummary {
        let runner = VerifyRunner::new(self.runner_config());
        let started = Instant::now();
        let mut reports = Vec::new();
        let mut errors = Vec::new();

        if scripts.len() > 1 {
            self.reporter
                .start_progress(scripts.len() as u64, "Running checks");
        }

        for script in scripts {
            self.reporter.set_message(&script.name);
            if self.config.verbosity.is_verbose() {
                self.reporter.info(&format!("Running {}", script.name));
            }

            match runner.run_script(script).await {
                Ok(report) => {
                    self.print_report(&report);
                    reports.push(report);
                }
                Err(e) => {
                    // the whole failure category collapses to one printed line
                    tracing::debug!(check = %script.name, error = %e, "check errored");
                    self.reporter.failure(&format!("{}: {e}", script.name));
                    errors.push(CheckError {
                        name: script.name.clone(),
                        error: e.to_string(),
                    });
                }
            }
            self.reporter.increment(1);
        }

        self.reporter.finish();
        let summary = RunSummary {
            generated_at: Utc::now(),
            reports,
            errors,
            duration: started.elapsed(),
        };
        self.reporter
            .summary(summary.passed_count(), summary.failed_count(), summary.duration);
        summary
    }

    fn print_report(&self, report: &ScriptReport) {
        if report.all_passed() {
            self.reporter.success(&format!(
                "{} ({} steps, {:.2}s)",
                report.script,
                report.total(),
                report.duration.as_secs_f64()
            ));
            if self.config.verbosity.is_verbose() {
                for shot in &report.screenshots {
                    self.reporter.info(&format!("screenshot: {}", shot.display()));
                }
            }
        } else {
            for outcome in report.failures() {
                let detail = outcome.detail.as_deref().unwrap_or("failed");
                self.reporter
                    .failure(&format!("{}: {} — {detail}", report.script, outcome.step));
            }
            if let Some(ref aborted) = report.aborted {
                self.reporter
                    .warning(&format!("{}: remaining steps skipped ({aborted})", report.script));
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn report(name: &str, passed: bool) -> ScriptReport {
        ScriptReport {
            script: name.to_string(),
            outcomes: vec![if passed {
                verificar::StepOutcome::pass("goto", Duration::ZERO)
            } else {
                verificar::StepOutcome::fail("expect", "not visible", Duration::ZERO)
            }],
            screenshots: vec![],
            aborted: None,
            duration: Duration::ZERO,
        }
    }

    fn summary(reports: Vec<ScriptReport>, errors: Vec<CheckError>) -> RunSummary {
        RunSummary {
            generated_at: Utc::now(),
            reports,
            errors,
            duration: Duration::from_secs(1),
        }
    }

    #[test]
    fn test_summary_counts() {
        let s = summary(
            vec![report("homepage", true), report("wallet-modal", false)],
            vec![CheckError {
                name: "ui".to_string(),
                error: "Navigation to http://localhost:3001 failed".to_string(),
            }],
        );
        assert_eq!(s.passed_count(), 1);
        assert_eq!(s.failed_count(), 2);
        assert!(!s.all_passed());
    }

    #[test]
    fn test_summary_all_passed() {
        let s = summary(vec![report("homepage", true)], vec![]);
        assert!(s.all_passed());
        assert_eq!(s.failed_count(), 0);
    }

    #[test]
    fn test_summary_serializes() {
        let s = summary(vec![report("homepage", true)], vec![]);
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("generated_at"));
        assert!(json.contains("homepage"));
    }
}
