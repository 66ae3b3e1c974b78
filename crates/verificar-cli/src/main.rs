//! Verificador: CLI for browser-based UI verification checks
//!
//! ## Usage
//!
//! ```bash
//! verificador run                      # Run all built-in checks
//! verificador run homepage             # Run one check
//! verificador run --url http://localhost:3001 ui
//! verificador run --script custom.yaml --strict
//! verificador list                     # List built-in checks
//! ```

use clap::Parser;
use std::process::ExitCode;
use verificador::{
    builtin_checks, checks, Cli, CliConfig, CliError, CliResult, CheckRunner, Commands, FormatArg,
    RunArgs, Verbosity,
};
use verificar::VerifyScript;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(&cli);
    let config = build_config(&cli);

    match cli.command {
        Commands::Run(args) => run_checks(config, &args),
        Commands::List => {
            list_checks();
            Ok(())
        }
    }
}

fn init_tracing(cli: &Cli) {
    let default_filter = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.clone().into())
}

fn run_checks(config: CliConfig, args: &RunArgs) -> CliResult<()> {
    let mut config = config
        .with_artifact_dir(args.output.to_string_lossy().to_string())
        .with_headless(!args.headed)
        .with_timeout(args.timeout)
        .with_strict(args.strict);
    if let Some(ref url) = args.url {
        config = config.with_base_url(url.clone());
    }
    if let Some(ref path) = args.chromium {
        config = config.with_chromium_path(path.clone());
    }

    let scripts = collect_scripts(&config, args)?;
    if scripts.is_empty() {
        return Err(CliError::invalid_argument("nothing to run"));
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let mut runner = CheckRunner::new(config.clone());
    let summary = runtime.block_on(runner.run(&scripts));

    if args.format == FormatArg::Json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    // Verification failures only affect the exit code in strict mode; the
    // default mirrors the original scripts, which always exited 0.
    if config.strict && !summary.all_passed() {
        return Err(CliError::verification(format!(
            "{} check(s) failed",
            summary.failed_count()
        )));
    }
    Ok(())
}

fn collect_scripts(config: &CliConfig, args: &RunArgs) -> CliResult<Vec<VerifyScript>> {
    let mut scripts = Vec::new();

    if args.checks.is_empty() && args.script.is_empty() {
        for check in builtin_checks() {
            scripts.push(check.build(config.base_url.as_deref()));
        }
    } else {
        for name in &args.checks {
            let check =
                checks::find(name).ok_or_else(|| CliError::unknown_check(name.clone()))?;
            scripts.push(check.build(config.base_url.as_deref()));
        }
    }

    for path in &args.script {
        let script = VerifyScript::from_yaml_file(path)
            .map_err(|e| CliError::config(format!("script {}: {e}", path.display())))?;
        scripts.push(script);
    }

    Ok(scripts)
}

fn list_checks() {
    println!("Built-in checks:");
    for check in builtin_checks() {
        println!(
            "  {:<14} {}  [{}]",
            check.name, check.summary, check.default_url
        );
    }
}
