//! Shared fixtures for tests

#![allow(dead_code)]

pub mod mock_platform;

pub use mock_platform::{CompareCall, CreateCommentCall, MockPlatformService, default_pr};

use ready_or_not::evaluate::{GateResults, ReadinessSnapshot};
use ready_or_not::gates::{GateResult, GateStatus};
use ready_or_not::types::{PlatformConfig, PrComment, PrState, PrSummary};

/// Config for a github.com repository
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "owner".to_string(),
        repo: "repo".to_string(),
        host: None,
    }
}

/// PR identity used by chart tests
pub fn make_summary(is_draft: bool) -> PrSummary {
    PrSummary {
        number: 123,
        title: "Add feature X".to_string(),
        head_ref: "feat/add-feature-x".to_string(),
        base_ref: "main".to_string(),
        state: PrState::Open,
        is_draft,
    }
}

pub fn pass() -> GateResult {
    GateResult::pass()
}

pub fn gate(status: GateStatus, detail: &str) -> GateResult {
    GateResult::new(status, detail)
}

/// Snapshot built straight from gate results
pub fn make_snapshot(
    branch: GateResult,
    checks: GateResult,
    threads: GateResult,
    reviewers: GateResult,
    is_draft: bool,
) -> ReadinessSnapshot {
    ReadinessSnapshot::from_results(
        make_summary(is_draft),
        GateResults {
            branch,
            checks,
            threads,
            reviewers,
        },
    )
}

/// Snapshot where every gate passes
pub fn passing_snapshot(is_draft: bool) -> ReadinessSnapshot {
    make_snapshot(
        pass(),
        gate(GateStatus::Pass, "5/5 passed"),
        pass(),
        pass(),
        is_draft,
    )
}

/// Existing PR comment
pub fn make_comment(id: u64, body: &str) -> PrComment {
    PrComment {
        id,
        node_id: format!("node{id}"),
        body: body.to_string(),
    }
}
