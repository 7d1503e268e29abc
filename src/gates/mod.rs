//! Readiness gates
//!
//! Each gate is a pure function from a narrow slice of PR state to a
//! [`GateResult`]. Gates never share state and never fail; precedence between
//! statuses is decided inside each evaluator.

mod branch;
mod checks;
mod compose;
mod draft;
mod reviewers;
mod threads;

pub use branch::evaluate_branch;
pub use checks::evaluate_checks;
pub use compose::compose_checks_gate;
pub use draft::evaluate_draft;
pub use reviewers::{BOT_SUFFIX, evaluate_reviewers};
pub use threads::evaluate_threads;

use serde::{Deserialize, Serialize};

/// Verdict of a single gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GateStatus {
    /// Gate is satisfied
    Pass,
    /// Gate blocks merge
    Fail,
    /// Gate is waiting on something still running
    Pending,
    /// Advisory only, never blocks merge
    Warn,
}

impl std::fmt::Display for GateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Fail => write!(f, "fail"),
            Self::Pending => write!(f, "pending"),
            Self::Warn => write!(f, "warn"),
        }
    }
}

/// Status plus human-readable explanation
///
/// An empty `detail` means there is nothing to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateResult {
    /// Gate verdict
    pub status: GateStatus,
    /// Singular/plural-aware explanation
    pub detail: String,
}

impl GateResult {
    /// Build a result with an explicit status and detail
    pub fn new(status: GateStatus, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    /// Passing result with nothing to report
    pub const fn pass() -> Self {
        Self {
            status: GateStatus::Pass,
            detail: String::new(),
        }
    }

    /// Whether the gate passed
    pub fn passed(&self) -> bool {
        self.status == GateStatus::Pass
    }
}

/// `"commit"` for one, `"commits"` otherwise
pub(crate) fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

/// `"1 commit"`, `"3 commits"`
pub(crate) fn count_noun(n: usize, noun: &str) -> String {
    format!("{n} {}", plural(n, noun))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_noun_pluralizes_everything_but_one() {
        assert_eq!(count_noun(0, "thread"), "0 threads");
        assert_eq!(count_noun(1, "thread"), "1 thread");
        assert_eq!(count_noun(2, "thread"), "2 threads");
        assert_eq!(plural(1, "commit"), "commit");
        assert_eq!(plural(0, "commit"), "commits");
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&GateResult::new(GateStatus::Pending, "x")).unwrap();
        assert_eq!(json, r#"{"status":"pending","detail":"x"}"#);
    }
}
