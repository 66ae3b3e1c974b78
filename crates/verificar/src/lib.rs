//! Verificar: browser-based UI verification runner.
//!
//! Verificar (Spanish: "to verify") drives a headless browser through scripted
//! navigation, interaction, and visibility checks against a running web
//! application, persisting screenshots for human review.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ VerifyScript │───►│ Executor /   │───►│ Headless     │
//! │ (steps)      │    │ Session      │    │ Browser (CDP)│
//! └──────────────┘    └──────┬───────┘    └──────────────┘
//!                            ▼
//!                     ScriptReport + PNG artifacts
//! ```
//!
//! With the `browser` feature, pages are driven over the Chrome DevTools
//! Protocol via chromiumoxide. Without it, an in-memory mock page backs the
//! same API so the script machinery is testable anywhere.

#![warn(missing_docs)]

pub mod artifact;
mod browser;
mod executor;
mod locator;
mod report;
mod result;
mod script;
mod session;
mod wait;

pub use browser::{Browser, BrowserConfig, Page};
pub use executor::ScriptExecutor;
pub use locator::Selector;
pub use report::{ScriptReport, StepOutcome, StepStatus};
pub use result::{VerifyError, VerifyResult};
pub use script::{Step, VerifyScript};
pub use session::{RunnerConfig, VerifyRunner};
pub use wait::{WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS};

/// Commonly used types
pub mod prelude {
    pub use crate::browser::{Browser, BrowserConfig, Page};
    pub use crate::executor::ScriptExecutor;
    pub use crate::locator::Selector;
    pub use crate::report::{ScriptReport, StepOutcome, StepStatus};
    pub use crate::result::{VerifyError, VerifyResult};
    pub use crate::script::{Step, VerifyScript};
    pub use crate::session::{RunnerConfig, VerifyRunner};
    pub use crate::wait::WaitOptions;
}
