//! Session lifecycle: launch, run, unconditional teardown.
//!
//! The browser session is exclusively owned by one script run and is closed
//! whether the run succeeded, failed its assertions, or errored mid-sequence.

use crate::browser::{Browser, BrowserConfig};
use crate::executor::ScriptExecutor;
use crate::report::ScriptReport;
use crate::result::VerifyResult;
use crate::script::VerifyScript;
use crate::wait::WaitOptions;
use std::path::PathBuf;

/// Configuration for a verification runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Browser configuration
    pub browser: BrowserConfig,
    /// Directory for screenshot artifacts
    pub artifact_dir: PathBuf,
    /// Default wait options
    pub wait: WaitOptions,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            browser: BrowserConfig::default(),
            artifact_dir: PathBuf::from("verification"),
            wait: WaitOptions::default(),
        }
    }
}

impl RunnerConfig {
    /// Create a new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the browser configuration
    #[must_use]
    pub fn with_browser(mut self, browser: BrowserConfig) -> Self {
        self.browser = browser;
        self
    }

    /// Set the artifact directory
    #[must_use]
    pub fn with_artifact_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifact_dir = dir.into();
        self
    }

    /// Set the default wait options
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }
}

/// Runs verification scripts, one browser session per script
#[derive(Debug, Clone)]
pub struct VerifyRunner {
    config: RunnerConfig,
}

impl VerifyRunner {
    /// Create a new runner
    #[must_use]
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    /// Get the runner configuration
    #[must_use]
    pub const fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run one script in a fresh browser session.
    ///
    /// The session is closed before this returns, regardless of outcome.
    /// Only a launch failure propagates without a report.
    ///
    /// # Errors
    ///
    /// Returns error if the browser cannot be launched or a page opened
    pub async fn run_script(&self, script: &VerifyScript) -> VerifyResult<ScriptReport> {
        let browser = Browser::launch(self.config.browser.clone()).await?;
        let result = self.drive(&browser, script).await;
        if let Err(e) = browser.close().await {
            tracing::warn!(error = %e, "browser close failed");
        }
        result
    }

    async fn drive(&self, browser: &Browser, script: &VerifyScript) -> VerifyResult<ScriptReport> {
        let mut page = browser.new_page().await?;
        let executor =
            ScriptExecutor::new(self.config.artifact_dir.clone()).with_wait(self.config.wait);
        Ok(executor.run(&mut page, script).await)
    }
}
