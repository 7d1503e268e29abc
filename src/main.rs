//! ready-or-not - merge-readiness report for GitHub pull requests

mod cli;

use clap::Parser;
use cli::{CheckArgs, CheckOutcome, run_check};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Exit code when `--exit-code` is set and gates have not all passed
const EXIT_BLOCKED: u8 = 1;

/// Exit code for operational failures (auth, network, detection)
const EXIT_ERROR: u8 = 2;

/// Merge-readiness gates for GitHub pull requests, rendered as a decision flowchart
#[derive(Parser, Debug)]
#[command(name = "ready-or-not")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    check: CheckArgs,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "ready_or_not=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run_check(cli.check).await {
        Ok(CheckOutcome::Success) => ExitCode::SUCCESS,
        Ok(CheckOutcome::Blocked) => ExitCode::from(EXIT_BLOCKED),
        Err(e) => {
            cli::print_error(&e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
