//! CI checks gate

use super::{GateResult, GateStatus};
use crate::types::CheckRun;

fn is_failed(run: &CheckRun) -> bool {
    run.conclusion.as_deref() == Some("failure")
}

fn is_pending(run: &CheckRun) -> bool {
    run.conclusion.is_none() && run.status != "completed"
}

fn is_passed(run: &CheckRun) -> bool {
    run.conclusion.as_deref() == Some("success")
}

/// Classify check runs into a single verdict.
///
/// Failures dominate pending runs, which dominate passes. Runs with other
/// conclusions (`neutral`, `skipped`, `cancelled`, ...) only count towards
/// the total.
pub fn evaluate_checks(runs: &[CheckRun]) -> GateResult {
    if runs.is_empty() {
        return GateResult::new(GateStatus::Pass, "No checks configured");
    }

    let total = runs.len();
    let failed: Vec<&str> = runs
        .iter()
        .filter(|r| is_failed(r))
        .map(|r| r.name.as_str())
        .collect();
    let pending = runs.iter().filter(|r| is_pending(r)).count();
    let passed = runs.iter().filter(|r| is_passed(r)).count();

    if !failed.is_empty() {
        return GateResult::new(
            GateStatus::Fail,
            format!("{}/{total} failing: {}", failed.len(), failed.join(", ")),
        );
    }

    if pending > 0 {
        return GateResult::new(
            GateStatus::Pending,
            format!("{pending}/{total} pending, {passed} passed"),
        );
    }

    GateResult::new(GateStatus::Pass, format!("{passed}/{total} passed"))
}
