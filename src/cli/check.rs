//! Check command - evaluate a PR and report its readiness

use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, link, spinner_style, status_marker};
use anstream::{eprintln, println};
use clap::Args;
use indicatif::ProgressBar;
use ready_or_not::comment::post_report;
use ready_or_not::error::{Error, Result};
use ready_or_not::evaluate::{EvaluateOptions, Evaluation, evaluate};
use ready_or_not::gates::GateResult;
use std::path::PathBuf;
use std::time::Duration;

/// Options for the check command
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// GitHub repository (auto-detected from the origin remote)
    #[arg(long, value_name = "OWNER/REPO")]
    pub repo: Option<String>,

    /// PR number (auto-detected from the current branch)
    #[arg(long, value_name = "NUMBER")]
    pub pr: Option<u64>,

    /// Post the chart as a PR comment, hiding earlier reports
    #[arg(long)]
    pub post: bool,

    /// Print the evaluation as JSON instead of the chart
    #[arg(long)]
    pub json: bool,

    /// Check run to ignore (the check reporting this evaluation)
    #[arg(long, value_name = "NAME")]
    pub self_check: Option<String>,

    /// Path to a config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// GitHub Enterprise host (defaults to GH_HOST, then github.com)
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Exit with status 1 when the PR is not ready to merge
    #[arg(long)]
    pub exit_code: bool,
}

/// How the command finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Report produced
    Success,
    /// Report produced, gates failing and `--exit-code` requested
    Blocked,
}

/// Run the check command
pub async fn run_check(args: CheckArgs) -> Result<CheckOutcome> {
    let ctx = CommandContext::new(&args)?;
    let options = EvaluateOptions {
        pr_number: ctx.pr_number,
        self_check_name: ctx.self_check_name(&args),
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    let repo = ctx.platform.config();
    spinner.set_message(format!(
        "Evaluating {}/{}#{}...",
        repo.owner, repo.repo, ctx.pr_number
    ));
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = evaluate(ctx.platform.as_ref(), &options).await;
    spinner.finish_and_clear();
    let evaluation = result?;

    if args.json {
        let json = serde_json::to_string_pretty(&evaluation)
            .map_err(|e| Error::Internal(format!("failed to serialize evaluation: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", evaluation.chart);
        print_summary(&evaluation);
    }

    if args.post {
        let posted = post_report(
            ctx.platform.as_ref(),
            ctx.pr_number,
            &evaluation.chart,
            evaluation.all_passed(),
            &ctx.config.post_options(),
        )
        .await?;

        eprintln!(
            "{} Posted report to {}",
            check(),
            link(&format!("PR #{}", ctx.pr_number), &evaluation.html_url).accent()
        );
        if posted.hidden > 0 {
            eprintln!(
                "{}",
                format!("  Hid {} earlier report(s)", posted.hidden).muted()
            );
        }
    }

    if args.exit_code && !evaluation.all_passed() {
        Ok(CheckOutcome::Blocked)
    } else {
        Ok(CheckOutcome::Success)
    }
}

/// Print a per-gate summary to stderr, keeping stdout for the chart
fn print_summary(evaluation: &Evaluation) {
    let snapshot = &evaluation.snapshot;

    eprintln!();
    eprintln!(
        "{} {}",
        "Readiness for".emphasis(),
        link(&format!("PR #{}", snapshot.pr.number), &evaluation.html_url).accent()
    );
    print_gate("Branch", &snapshot.branch);
    print_gate("Checks", &snapshot.checks);
    print_gate("Threads", &snapshot.threads);
    print_gate("Reviewers", &snapshot.reviewers);
    print_gate("Draft", &snapshot.draft);
    eprintln!();

    if snapshot.all_passed {
        eprintln!("{}", "All gates passed".success());
    } else {
        let blockers: Vec<&str> = snapshot.blockers().into_iter().map(|(name, _)| name).collect();
        eprintln!(
            "{} {}",
            "Blocked by:".warn(),
            blockers.join(", ")
        );
    }
}

fn print_gate(name: &str, gate: &GateResult) {
    if gate.detail.is_empty() {
        eprintln!("  {} {name}", status_marker(gate.status));
    } else {
        eprintln!(
            "  {} {name}: {}",
            status_marker(gate.status),
            gate.detail.muted()
        );
    }
}
