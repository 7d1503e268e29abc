//! Draft status gate (advisory)

use super::{GateResult, GateStatus};

/// Advise on draft state given whether the blocking gates passed.
///
/// A PR should sit in draft while gates fail and leave draft once they pass.
pub fn evaluate_draft(is_draft: bool, all_gates_passed: bool) -> GateResult {
    match (is_draft, all_gates_passed) {
        (true, false) => GateResult::new(GateStatus::Pass, "Draft (gates pending)"),
        (true, true) => GateResult::new(GateStatus::Fail, "Mark as Ready for Review"),
        (false, false) => GateResult::new(
            GateStatus::Warn,
            "Should be in draft while gates are failing",
        ),
        (false, true) => GateResult::pass(),
    }
}
