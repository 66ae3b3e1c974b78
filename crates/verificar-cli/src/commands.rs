//! CLI command definitions using clap

use crate::config::ColorChoice;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Verificador: browser-based UI verification checks with screenshot artifacts
#[derive(Parser, Debug)]
#[command(name = "verificador")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run verification checks against the target application
    Run(RunArgs),

    /// List the built-in checks
    List,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Built-in checks to run (default: all)
    #[arg(value_name = "CHECK")]
    pub checks: Vec<String>,

    /// Additional script files (YAML) to run
    #[arg(long, value_name = "FILE")]
    pub script: Vec<PathBuf>,

    /// Target URL override (default: each check's own URL)
    #[arg(long, env = "VERIFICAR_URL")]
    pub url: Option<String>,

    /// Directory for screenshot artifacts
    #[arg(short, long, default_value = "verification")]
    pub output: PathBuf,

    /// Run with a visible browser window
    #[arg(long)]
    pub headed: bool,

    /// Wait timeout in milliseconds
    #[arg(long, default_value = "30000")]
    pub timeout: u64,

    /// Exit non-zero when a check fails
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: FormatArg,

    /// Path to the chromium binary
    #[arg(long, env = "CHROMIUM_PATH")]
    pub chromium: Option<String>,
}

/// Color output argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Detect terminal support
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Report output format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable status lines
    #[default]
    Text,
    /// JSON reports on stdout
    Json,
}
