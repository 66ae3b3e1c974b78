//! Sequential script executor.
//!
//! Steps run strictly in order; each blocks until complete. A failed
//! `ExpectVisible` is recorded and the sequence continues. Any other failure
//! aborts the remaining steps, which are recorded as skipped. Errors never
//! escape the executor: they end up in the report.

use crate::artifact;
use crate::browser::Page;
use crate::report::{ScriptReport, StepOutcome};
use crate::result::VerifyResult;
use crate::script::{Step, VerifyScript};
use crate::wait::WaitOptions;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// What a single step produced
enum StepVerdict {
    /// Step completed
    Ok,
    /// Visibility assertion failed; the sequence continues
    AssertionFailed(String),
}

/// Executes verification scripts against a page
#[derive(Debug, Clone)]
pub struct ScriptExecutor {
    artifact_dir: PathBuf,
    wait: WaitOptions,
}

impl Default for ScriptExecutor {
    fn default() -> Self {
        Self::new("verification")
    }
}

impl ScriptExecutor {
    /// Create an executor writing artifacts under the given directory
    #[must_use]
    pub fn new(artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: artifact_dir.into(),
            wait: WaitOptions::default(),
        }
    }

    /// Set the default wait options
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Run a script against a page, recording one outcome per step
    pub async fn run(&self, page: &mut Page, script: &VerifyScript) -> ScriptReport {
        let started = Instant::now();
        let mut outcomes = Vec::with_capacity(script.steps.len());
        let mut screenshots = Vec::new();
        let mut aborted: Option<String> = None;

        tracing::info!(script = %script.name, steps = script.step_count(), "running script");

        for step in &script.steps {
            if aborted.is_some() {
                outcomes.push(StepOutcome::skip(step.describe()));
                continue;
            }

            let step_started = Instant::now();
            match self.apply(page, step, &mut screenshots).await {
                Ok(StepVerdict::Ok) => {
                    tracing::debug!(step = %step.describe(), "step passed");
                    outcomes.push(StepOutcome::pass(step.describe(), step_started.elapsed()));
                }
                Ok(StepVerdict::AssertionFailed(detail)) => {
                    tracing::error!(step = %step.describe(), %detail, "assertion failed");
                    outcomes.push(StepOutcome::fail(
                        step.describe(),
                        detail,
                        step_started.elapsed(),
                    ));
                }
                Err(e) => {
                    let detail = e.to_string();
                    tracing::error!(step = %step.describe(), error = %detail, "step errored");
                    outcomes.push(StepOutcome::fail(
                        step.describe(),
                        detail.clone(),
                        step_started.elapsed(),
                    ));
                    aborted = Some(detail);
                }
            }
        }

        ScriptReport {
            script: script.name.clone(),
            outcomes,
            screenshots,
            aborted,
            duration: started.elapsed(),
        }
    }

    async fn apply(
        &self,
        page: &mut Page,
        step: &Step,
        screenshots: &mut Vec<PathBuf>,
    ) -> VerifyResult<StepVerdict> {
        match step {
            Step::Goto { url } => {
                page.goto(url).await?;
                Ok(StepVerdict::Ok)
            }
            Step::WaitVisible {
                selector,
                timeout_ms,
            } => {
                let opts = match timeout_ms {
                    Some(ms) => self.wait.with_timeout(*ms),
                    None => self.wait,
                };
                page.wait_for_visible(selector, &opts).await?;
                Ok(StepVerdict::Ok)
            }
            Step::Pause { ms } => {
                page.pause(Duration::from_millis(*ms)).await;
                Ok(StepVerdict::Ok)
            }
            Step::Click { selector } => {
                page.click(selector).await?;
                Ok(StepVerdict::Ok)
            }
            Step::Press { key } => {
                page.press_key(key).await?;
                Ok(StepVerdict::Ok)
            }
            Step::ExpectVisible { selector } => {
                if page.is_visible(selector).await? {
                    Ok(StepVerdict::Ok)
                } else {
                    Ok(StepVerdict::AssertionFailed(format!(
                        "{} not visible",
                        selector.describe()
                    )))
                }
            }
            Step::Screenshot { path, full_page } => {
                let bytes = page.screenshot(*full_page).await?;
                let target = artifact::resolve(&self.artifact_dir, path);
                artifact::save_png(&target, &bytes)?;
                screenshots.push(target);
                Ok(StepVerdict::Ok)
            }
        }
    }
}

#[cfg(all(test, not(feature = "browser")))]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::browser::Page;
    use crate::locator::Selector;
    use crate::report::StepStatus;

    fn rendered_homepage() -> Page {
        let mut page = Page::new(1280, 720);
        page.register_present("Create Tracking");
        page.register_present("Connect Wallet");
        page
    }

    #[tokio::test]
    async fn test_homepage_script_passes_when_text_renders() {
        let dir = tempfile::tempdir().unwrap();
        let executor = ScriptExecutor::new(dir.path());
        let mut page = rendered_homepage();

        let script = VerifyScript::new("homepage")
            .goto("http://localhost:3000")
            .wait_for_text("Create Tracking")
            .expect_text("Create Tracking")
            .expect_text("Connect Wallet")
            .screenshot("homepage.png");

        let report = executor.run(&mut page, &script).await;
        assert!(report.all_passed(), "failures: {:?}", report.failures());
        assert_eq!(report.screenshots.len(), 1);
        assert!(report.screenshots[0].ends_with("homepage.png"));
        assert!(report.screenshots[0].exists());
    }

    #[tokio::test]
    async fn test_assertion_failure_does_not_stop_later_steps() {
        let dir = tempfile::tempdir().unwrap();
        let executor = ScriptExecutor::new(dir.path());
        let mut page = rendered_homepage();

        let script = VerifyScript::new("wallet-modal")
            .goto("http://localhost:3000")
            .expect_text("MetaMask Not Found")
            .screenshot("wallet_modal_check.png");

        let report = executor.run(&mut page, &script).await;
        assert!(!report.all_passed());
        assert_eq!(report.failed_count(), 1);
        // screenshot still taken after the failed assertion
        assert_eq!(report.outcomes[2].status, StepStatus::Passed);
        assert!(report.screenshots[0].exists());
    }

    #[tokio::test]
    async fn test_hard_error_skips_remaining_steps() {
        let dir = tempfile::tempdir().unwrap();
        let executor = ScriptExecutor::new(dir.path());
        let mut page = rendered_homepage();

        let script = VerifyScript::new("ui")
            .goto("http://localhost:3001")
            .click_text("Start a Shipment")
            .screenshot("start_modal.png")
            .expect_text("Create Tracking");

        let report = executor.run(&mut page, &script).await;
        assert!(report.aborted.is_some());
        assert_eq!(report.outcomes[1].status, StepStatus::Failed);
        assert_eq!(report.outcomes[2].status, StepStatus::Skipped);
        assert_eq!(report.outcomes[3].status, StepStatus::Skipped);
        assert!(report.screenshots.is_empty());
    }

    #[tokio::test]
    async fn test_wait_timeout_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let executor = ScriptExecutor::new(dir.path());
        let mut page = Page::new(1280, 720);

        let script = VerifyScript::new("ui")
            .goto("http://localhost:3001")
            .wait_for_text("SupplyChain")
            .screenshot("main_page.png");

        let report = executor.run(&mut page, &script).await;
        let aborted = report.aborted.unwrap();
        assert!(aborted.contains("SupplyChain"));
        assert_eq!(report.outcomes[2].status, StepStatus::Skipped);
    }

    #[tokio::test]
    async fn test_click_records_on_mock() {
        let dir = tempfile::tempdir().unwrap();
        let executor = ScriptExecutor::new(dir.path());
        let mut page = rendered_homepage();

        let script = VerifyScript::new("wallet-modal")
            .goto("http://localhost:3000")
            .pause_ms(2000)
            .click_button("Connect Wallet")
            .press("Escape");

        let report = executor.run(&mut page, &script).await;
        assert!(report.all_passed());
        assert_eq!(page.clicks().len(), 1);
        assert_eq!(page.keys(), ["Escape"]);
    }

    #[tokio::test]
    async fn test_rerun_overwrites_screenshot() {
        let dir = tempfile::tempdir().unwrap();
        let executor = ScriptExecutor::new(dir.path());
        let mut page = rendered_homepage();

        let script = VerifyScript::new("homepage")
            .goto("http://localhost:3000")
            .screenshot("homepage.png");

        let first = executor.run(&mut page, &script).await;
        let second = executor.run(&mut page, &script).await;
        assert!(first.all_passed() && second.all_passed());
        assert_eq!(first.screenshots, second.screenshots);
    }

    #[tokio::test]
    async fn test_expect_visible_css_selector() {
        let dir = tempfile::tempdir().unwrap();
        let executor = ScriptExecutor::new(dir.path());
        let mut page = Page::new(1280, 720);
        page.register_present("body");

        let script = VerifyScript::new("app-load")
            .goto("http://localhost:3000")
            .expect_visible(Selector::css("body"))
            .screenshot("app_load.png");

        let report = executor.run(&mut page, &script).await;
        assert!(report.all_passed());
    }
}
