//! Composite checks gate

use super::{GateResult, GateStatus};

/// Merge the checks and threads verdicts into the single gate shown in the chart.
///
/// Either one failing fails the composite; checks pending only counts when
/// nothing failed. Details are joined checks-first.
pub fn compose_checks_gate(checks: &GateResult, threads: &GateResult) -> GateResult {
    let mut status = GateStatus::Pass;
    let mut details: Vec<&str> = Vec::new();

    if checks.status == GateStatus::Fail {
        status = GateStatus::Fail;
        details.push(&checks.detail);
    }
    if threads.status == GateStatus::Fail {
        status = GateStatus::Fail;
        details.push(&threads.detail);
    }
    if status != GateStatus::Fail && checks.status == GateStatus::Pending {
        status = GateStatus::Pending;
        details.push(&checks.detail);
    }

    GateResult::new(status, details.join(", "))
}
