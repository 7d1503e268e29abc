//! Evaluation orchestration - the only part of the core that touches the platform

use crate::chart::generate_chart;
use crate::error::{Error, Result};
use crate::evaluate::snapshot::{GateInputs, ReadinessSnapshot};
use crate::platform::PlatformService;
use crate::types::{PrSummary, PullRequestDetails};
use serde::Serialize;
use tracing::{debug, info};

/// What to evaluate
#[derive(Debug, Clone, Default)]
pub struct EvaluateOptions {
    /// Pull request number
    pub pr_number: u64,
    /// Name of the check run reporting this evaluation, excluded so the
    /// report does not wait on itself
    pub self_check_name: Option<String>,
}

/// Verdicts plus the rendered chart
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// Every gate verdict
    pub snapshot: ReadinessSnapshot,
    /// Header and fenced flowchart
    pub chart: String,
    /// Web URL for the PR
    pub html_url: String,
}

impl Evaluation {
    /// Branch and composite checks gate both passed
    pub const fn all_passed(&self) -> bool {
        self.snapshot.all_passed
    }
}

/// Fetch the PR and its readiness signals.
///
/// The PR is fetched first for its head commit and refs; compare, check runs
/// and review threads are then fetched concurrently and all must succeed.
pub async fn gather_inputs(
    platform: &dyn PlatformService,
    options: &EvaluateOptions,
) -> Result<(PullRequestDetails, GateInputs)> {
    let pr = platform.get_pr_details(options.pr_number).await?;
    debug!(
        pr_number = pr.number,
        head = %pr.head_ref,
        base = %pr.base_ref,
        "fetched PR"
    );

    let (compare, mut check_runs, threads) = tokio::try_join!(
        platform.compare_commits(&pr.base_ref, &pr.head_ref),
        platform.list_check_runs(&pr.head_sha),
        platform.list_review_threads(pr.number),
    )?;

    if let Some(ref self_name) = options.self_check_name {
        let before = check_runs.len();
        check_runs.retain(|run| &run.name != self_name);
        debug!(
            self_check = %self_name,
            excluded = before - check_runs.len(),
            "excluded self check run"
        );
    }

    let inputs = GateInputs {
        compare,
        check_runs,
        threads,
        reviewers: pr.requested_reviewers.clone(),
    };
    Ok((pr, inputs))
}

/// Evaluate a PR end to end.
///
/// Any fetch failure aborts the whole evaluation with
/// [`Error::EvaluationFailed`]; no partial verdicts are produced.
pub async fn evaluate(
    platform: &dyn PlatformService,
    options: &EvaluateOptions,
) -> Result<Evaluation> {
    let repo = platform.config();
    info!(
        owner = %repo.owner,
        repo = %repo.repo,
        pr_number = options.pr_number,
        "evaluating PR readiness"
    );

    let (pr, inputs) = gather_inputs(platform, options)
        .await
        .map_err(|e| Error::evaluation_failed(options.pr_number, e))?;

    let snapshot = ReadinessSnapshot::compute(PrSummary::from(&pr), &inputs);
    let chart = generate_chart(&snapshot);

    info!(
        pr_number = pr.number,
        all_passed = snapshot.all_passed,
        branch = %snapshot.branch.status,
        checks = %snapshot.checks_gate.status,
        "evaluated PR readiness"
    );

    Ok(Evaluation {
        snapshot,
        chart,
        html_url: pr.html_url,
    })
}
