//! Branch currency gate

use super::{GateResult, GateStatus, count_noun};
use crate::types::CompareCounts;

/// Pass iff the head branch is not behind its base.
///
/// `ahead_by` does not take part in the verdict.
pub fn evaluate_branch(compare: &CompareCounts) -> GateResult {
    if compare.behind_by == 0 {
        return GateResult::pass();
    }

    let behind = usize::try_from(compare.behind_by).unwrap_or(usize::MAX);
    GateResult::new(
        GateStatus::Fail,
        format!("{} behind", count_noun(behind, "commit")),
    )
}
