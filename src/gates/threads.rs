//! Review thread resolution gate

use super::{GateResult, GateStatus, plural};
use crate::types::ReviewThread;

/// Fail while any review thread is unresolved
pub fn evaluate_threads(threads: &[ReviewThread]) -> GateResult {
    let unresolved = threads.iter().filter(|t| !t.is_resolved).count();

    if unresolved == 0 {
        return GateResult::pass();
    }

    GateResult::new(
        GateStatus::Fail,
        format!("{unresolved} unresolved {}", plural(unresolved, "thread")),
    )
}
