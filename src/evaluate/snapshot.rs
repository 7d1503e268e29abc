//! Readiness computation - pure functions over gathered signals
//!
//! No I/O happens here: signals are passed in, making every gate
//! combination easy to unit test.

use crate::gates::{
    GateResult, GateStatus, compose_checks_gate, evaluate_branch, evaluate_checks,
    evaluate_draft, evaluate_reviewers, evaluate_threads,
};
use crate::types::{CheckRun, CompareCounts, PrSummary, ReviewThread, Reviewer};
use serde::{Deserialize, Serialize};

/// Raw signals for one evaluation, already shaped for the evaluators
#[derive(Debug, Clone, Default)]
pub struct GateInputs {
    /// Ahead/behind counts of head vs base
    pub compare: CompareCounts,
    /// Check runs on the head commit (self-check already excluded)
    pub check_runs: Vec<CheckRun>,
    /// Review threads on the PR
    pub threads: Vec<ReviewThread>,
    /// Requested reviewers
    pub reviewers: Vec<Reviewer>,
}

/// Results of the four gates that do not depend on other gates
#[derive(Debug, Clone)]
pub struct GateResults {
    /// Branch currency
    pub branch: GateResult,
    /// CI checks
    pub checks: GateResult,
    /// Review threads
    pub threads: GateResult,
    /// Reviewer count (advisory)
    pub reviewers: GateResult,
}

impl GateResults {
    /// Run the independent evaluators
    pub fn evaluate(inputs: &GateInputs) -> Self {
        Self {
            branch: evaluate_branch(&inputs.compare),
            checks: evaluate_checks(&inputs.check_runs),
            threads: evaluate_threads(&inputs.threads),
            reviewers: evaluate_reviewers(&inputs.reviewers),
        }
    }
}

/// Every gate verdict for one PR, plus the derived merge readiness
///
/// Built once per evaluation and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessSnapshot {
    /// PR identity
    pub pr: PrSummary,
    /// Branch currency
    pub branch: GateResult,
    /// CI checks
    pub checks: GateResult,
    /// Review threads
    pub threads: GateResult,
    /// Checks and threads merged into the gate shown in the chart
    pub checks_gate: GateResult,
    /// Reviewer count (advisory)
    pub reviewers: GateResult,
    /// Draft status (advisory, depends on `all_passed`)
    pub draft: GateResult,
    /// Branch and composite checks gate both passed
    pub all_passed: bool,
    /// Commits ahead of base; reserved, never part of a verdict
    pub ahead_by: u64,
}

impl ReadinessSnapshot {
    /// Evaluate every gate from raw signals
    pub fn compute(pr: PrSummary, inputs: &GateInputs) -> Self {
        let mut snapshot = Self::from_results(pr, GateResults::evaluate(inputs));
        snapshot.ahead_by = inputs.compare.ahead_by;
        snapshot
    }

    /// Derive the composite, `all_passed` and draft advice from gate results.
    ///
    /// Reviewers and draft never feed into `all_passed`; draft is evaluated
    /// only once `all_passed` is known.
    pub fn from_results(pr: PrSummary, results: GateResults) -> Self {
        let checks_gate = compose_checks_gate(&results.checks, &results.threads);
        let all_passed =
            results.branch.status == GateStatus::Pass && checks_gate.status == GateStatus::Pass;
        let draft = evaluate_draft(pr.is_draft, all_passed);

        Self {
            pr,
            branch: results.branch,
            checks: results.checks,
            threads: results.threads,
            checks_gate,
            reviewers: results.reviewers,
            draft,
            all_passed,
            ahead_by: 0,
        }
    }

    /// Blocking gates that did not pass, as `(name, detail)` pairs
    pub fn blockers(&self) -> Vec<(&'static str, &str)> {
        [
            ("branch", &self.branch),
            ("checks", &self.checks),
            ("threads", &self.threads),
        ]
        .into_iter()
        .filter(|(_, gate)| !gate.passed())
        .map(|(name, gate)| (name, gate.detail.as_str()))
        .collect()
    }
}
