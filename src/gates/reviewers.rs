//! Reviewer count gate (advisory)

use super::{GateResult, GateStatus};
use crate::types::Reviewer;

/// Login suffix GitHub gives to app/bot accounts
pub const BOT_SUFFIX: &str = "[bot]";

/// Warn when more than one human reviewer is requested.
///
/// Bots are ignored entirely. This gate never fails.
pub fn evaluate_reviewers(reviewers: &[Reviewer]) -> GateResult {
    let humans: Vec<&str> = reviewers
        .iter()
        .map(|r| r.login.as_str())
        .filter(|login| !login.ends_with(BOT_SUFFIX))
        .collect();

    if humans.len() > 1 {
        return GateResult::new(
            GateStatus::Warn,
            format!("{} reviewers: {}", humans.len(), humans.join(", ")),
        );
    }

    GateResult::pass()
}
