//! pinwatch - widen a pyproject.toml constraint to admit the latest
//! upstream release
//!
//! Exit status:
//! - 0: the constraint already admits the latest release
//! - 1: the constraint was updated (or would be, in dry-run)
//! - 2: the check could not be completed

use clap::Parser;
use pinwatch::cli::CliArgs;
use pinwatch::orchestrator::Orchestrator;
use pinwatch::output::{create_formatter, OutputConfig};
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_tracing(&args);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Logs go to stderr so stdout carries only the result
fn init_tracing(args: &CliArgs) {
    let default_level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let orchestrator = Orchestrator::new(&args)?;
    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        manifest = %orchestrator.config().manifest.display(),
        dry_run = orchestrator.config().dry_run,
        "starting"
    );

    let report = orchestrator.run().await?;

    let output_config = OutputConfig::from_cli(args.json, args.verbose, args.quiet)
        .with_color(!args.json && io::stdout().is_terminal());
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    if report.status.needs_update() {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
