//! Verification scripts: linear sequences of browser steps.
//!
//! A script is data, not code: the same executor drives the built-in checks
//! and scripts loaded from YAML files.

use crate::locator::Selector;
use crate::result::VerifyResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A single step in a verification script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Step {
    /// Navigate to a URL
    #[serde(rename = "goto")]
    Goto {
        /// Target URL
        url: String,
    },
    /// Wait for an element to become visible
    #[serde(rename = "wait_visible")]
    WaitVisible {
        /// Selector to wait for
        selector: Selector,
        /// Override of the default wait timeout
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_ms: Option<u64>,
    },
    /// Pause for a fixed duration
    #[serde(rename = "pause")]
    Pause {
        /// Duration in milliseconds
        ms: u64,
    },
    /// Click an element
    #[serde(rename = "click")]
    Click {
        /// Selector to click
        selector: Selector,
    },
    /// Press a key (e.g., "Escape")
    #[serde(rename = "press")]
    Press {
        /// Key name
        key: String,
    },
    /// Assert that an element is visible; failure is recorded, not fatal
    #[serde(rename = "expect_visible")]
    ExpectVisible {
        /// Selector that must be visible
        selector: Selector,
    },
    /// Capture a screenshot to a path under the artifact directory
    #[serde(rename = "screenshot")]
    Screenshot {
        /// Output path (relative to the artifact directory)
        path: PathBuf,
        /// Capture beyond the viewport
        #[serde(default)]
        full_page: bool,
    },
}

impl Step {
    /// Human-readable description for reports
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Goto { url } => format!("goto {url}"),
            Self::WaitVisible { selector, .. } => format!("wait for {}", selector.describe()),
            Self::Pause { ms } => format!("pause {ms}ms"),
            Self::Click { selector } => format!("click {}", selector.describe()),
            Self::Press { key } => format!("press {key}"),
            Self::ExpectVisible { selector } => format!("expect {}", selector.describe()),
            Self::Screenshot { path, full_page } => {
                if *full_page {
                    format!("screenshot {} (full page)", path.display())
                } else {
                    format!("screenshot {}", path.display())
                }
            }
        }
    }
}

/// A named verification script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyScript {
    /// Script name
    pub name: String,
    /// Script description
    #[serde(default)]
    pub description: String,
    /// Steps, executed in order
    pub steps: Vec<Step>,
}

impl VerifyScript {
    /// Create a new empty script
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            steps: Vec::new(),
        }
    }

    /// Set the description
    #[must_use]
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a step
    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Navigate to a URL
    #[must_use]
    pub fn goto(self, url: impl Into<String>) -> Self {
        self.step(Step::Goto { url: url.into() })
    }

    /// Wait for a selector to become visible
    #[must_use]
    pub fn wait_for(self, selector: Selector) -> Self {
        self.step(Step::WaitVisible {
            selector,
            timeout_ms: None,
        })
    }

    /// Wait for visible text
    #[must_use]
    pub fn wait_for_text(self, text: impl Into<String>) -> Self {
        self.wait_for(Selector::text(text))
    }

    /// Pause for a fixed number of milliseconds
    #[must_use]
    pub fn pause_ms(self, ms: u64) -> Self {
        self.step(Step::Pause { ms })
    }

    /// Click a selector
    #[must_use]
    pub fn click(self, selector: Selector) -> Self {
        self.step(Step::Click { selector })
    }

    /// Click an element by visible text
    #[must_use]
    pub fn click_text(self, text: impl Into<String>) -> Self {
        self.click(Selector::text(text))
    }

    /// Click a button by accessible name
    #[must_use]
    pub fn click_button(self, name: impl Into<String>) -> Self {
        self.click(Selector::button(name))
    }

    /// Press a key
    #[must_use]
    pub fn press(self, key: impl Into<String>) -> Self {
        self.step(Step::Press { key: key.into() })
    }

    /// Expect a selector to be visible (non-fatal on failure)
    #[must_use]
    pub fn expect_visible(self, selector: Selector) -> Self {
        self.step(Step::ExpectVisible { selector })
    }

    /// Expect text to be visible (non-fatal on failure)
    #[must_use]
    pub fn expect_text(self, text: impl Into<String>) -> Self {
        self.expect_visible(Selector::text(text))
    }

    /// Capture a viewport screenshot
    #[must_use]
    pub fn screenshot(self, path: impl Into<PathBuf>) -> Self {
        self.step(Step::Screenshot {
            path: path.into(),
            full_page: false,
        })
    }

    /// Capture a full-page screenshot
    #[must_use]
    pub fn screenshot_full(self, path: impl Into<PathBuf>) -> Self {
        self.step(Step::Screenshot {
            path: path.into(),
            full_page: true,
        })
    }

    /// Number of steps
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Parse a script from YAML
    ///
    /// # Errors
    ///
    /// Returns error if the YAML does not describe a valid script
    pub fn from_yaml(yaml: &str) -> VerifyResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load a script from a YAML file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn from_yaml_file(path: &Path) -> VerifyResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Serialize the script to YAML
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails
    pub fn to_yaml(&self) -> VerifyResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn homepage_like() -> VerifyScript {
        VerifyScript::new("homepage")
            .goto("http://localhost:3000")
            .wait_for_text("Create Tracking")
            .expect_text("Create Tracking")
            .expect_text("Connect Wallet")
            .screenshot("homepage.png")
    }

    mod builder_tests {
        use super::*;

        #[test]
        fn test_builder_orders_steps() {
            let script = homepage_like();
            assert_eq!(script.step_count(), 5);
            assert!(matches!(script.steps[0], Step::Goto { .. }));
            assert!(matches!(script.steps[4], Step::Screenshot { .. }));
        }

        #[test]
        fn test_click_button_uses_role_selector() {
            let script = VerifyScript::new("wallet").click_button("Connect Wallet");
            match &script.steps[0] {
                Step::Click { selector } => {
                    assert_eq!(selector, &Selector::button("Connect Wallet"));
                }
                other => panic!("unexpected step: {other:?}"),
            }
        }

        #[test]
        fn test_full_page_screenshot() {
            let script = VerifyScript::new("ui").screenshot_full("main_page.png");
            match &script.steps[0] {
                Step::Screenshot { full_page, .. } => assert!(*full_page),
                other => panic!("unexpected step: {other:?}"),
            }
        }

        #[test]
        fn test_describe_steps() {
            let script = homepage_like();
            assert_eq!(script.steps[0].describe(), "goto http://localhost:3000");
            assert!(script.steps[1].describe().contains("Create Tracking"));
        }
    }

    mod yaml_tests {
        use super::*;

        #[test]
        fn test_yaml_round_trip() {
            let script = homepage_like();
            let yaml = script.to_yaml().unwrap();
            let back = VerifyScript::from_yaml(&yaml).unwrap();
            assert_eq!(script, back);
        }

        #[test]
        fn test_from_yaml_document() {
            let yaml = r#"
name: wallet-modal
description: wallet prompt appears without MetaMask
steps:
  - action: goto
    url: http://localhost:3000
  - action: pause
    ms: 2000
  - action: click
    selector:
      type: role
      role: button
      name: Connect Wallet
  - action: expect_visible
    selector:
      type: text
      text: MetaMask Not Found
  - action: screenshot
    path: wallet_modal_check_final.png
"#;
            let script = VerifyScript::from_yaml(yaml).unwrap();
            assert_eq!(script.name, "wallet-modal");
            assert_eq!(script.step_count(), 5);
            assert!(matches!(script.steps[2], Step::Click { .. }));
        }

        #[test]
        fn test_invalid_yaml_is_error() {
            let err = VerifyScript::from_yaml("steps: {not a list}").unwrap_err();
            assert!(err.to_string().contains("YAML"));
        }
    }
}
