//! Platform services for GitHub
//!
//! Provides the interface the evaluator gathers readiness signals through,
//! plus the comment operations used to publish the report.

mod detection;
mod github;

pub use detection::{
    detect_pr_number, detect_repo, detect_repo_root, parse_repo_info, parse_repo_slug,
};
pub use github::GitHubService;

use crate::error::Result;
use crate::types::{
    CheckRun, CompareCounts, PlatformConfig, PrComment, PullRequestDetails, ReviewThread,
};
use async_trait::async_trait;

/// Platform service trait for readiness signals and report comments
///
/// The evaluator only depends on this trait, so tests can substitute an
/// in-memory implementation for the GitHub API.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Get PR metadata: title, state, draft flag, refs, head commit, reviewers
    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails>;

    /// Ahead/behind counts of `head` relative to `base`
    async fn compare_commits(&self, base: &str, head: &str) -> Result<CompareCounts>;

    /// All check runs for a commit
    async fn list_check_runs(&self, sha: &str) -> Result<Vec<CheckRun>>;

    /// All review threads on a PR
    async fn list_review_threads(&self, pr_number: u64) -> Result<Vec<ReviewThread>>;

    /// List comments on a PR
    async fn list_pr_comments(&self, pr_number: u64) -> Result<Vec<PrComment>>;

    /// Create a comment on a PR, returning the new comment
    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<PrComment>;

    /// Collapse a comment as outdated
    async fn minimize_comment(&self, node_id: &str) -> Result<()>;

    /// React to a comment with a thumbs up
    async fn add_comment_reaction(&self, comment_id: u64) -> Result<()>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
