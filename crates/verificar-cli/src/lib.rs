//! Verificador CLI Library
//!
//! Command-line interface for the Verificar UI verification runner.

#![warn(missing_docs)]

pub mod checks;
mod commands;
mod config;
mod error;
mod output;
mod runner;

pub use checks::{builtin_checks, BuiltinCheck, DEFAULT_APP_URL, DEFAULT_UI_URL};
pub use commands::{Cli, ColorArg, Commands, FormatArg, RunArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::ProgressReporter;
pub use runner::{CheckError, CheckRunner, RunSummary};
