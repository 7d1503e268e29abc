//! Core types for ready-or-not
//!
//! Raw readiness signals as fetched from the platform, already shaped for
//! the gate evaluators.

use serde::{Deserialize, Serialize};

/// Ahead/behind counts of the head branch relative to the base branch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareCounts {
    /// Commits on base that are missing from head
    pub behind_by: u64,
    /// Commits on head that are not on base
    pub ahead_by: u64,
}

/// A single CI check run on the head commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRun {
    /// Check run name
    pub name: String,
    /// Final conclusion (`success`, `failure`, `neutral`, ...) once completed
    pub conclusion: Option<String>,
    /// Lifecycle status (`queued`, `in_progress`, `completed`)
    pub status: String,
}

impl CheckRun {
    /// Build a check run record
    pub fn new(name: impl Into<String>, conclusion: Option<&str>, status: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conclusion: conclusion.map(ToString::to_string),
            status: status.into(),
        }
    }
}

/// A review thread on the pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewThread {
    /// Whether the thread has been resolved
    pub is_resolved: bool,
}

/// A requested reviewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    /// GitHub login (bots end with `[bot]`)
    pub login: String,
}

impl Reviewer {
    /// Build a reviewer record
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: login.into(),
        }
    }
}

/// Repository coordinates on GitHub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

/// PR state (open, closed, merged)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrState {
    /// PR is open
    Open,
    /// PR was closed without merging
    Closed,
    /// PR was merged
    Merged,
}

impl std::fmt::Display for PrState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Merged => write!(f, "merged"),
        }
    }
}

/// Pull request metadata needed for an evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequestDetails {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Current state of the PR
    pub state: PrState,
    /// Whether PR is a draft
    pub is_draft: bool,
    /// Head branch name
    pub head_ref: String,
    /// Head commit SHA (check runs are looked up against it)
    pub head_sha: String,
    /// Base branch name
    pub base_ref: String,
    /// Web URL for the PR
    pub html_url: String,
    /// Reviewers currently requested on the PR
    pub requested_reviewers: Vec<Reviewer>,
}

/// PR identity carried into the readiness snapshot and chart header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrSummary {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Head branch name
    pub head_ref: String,
    /// Base branch name
    pub base_ref: String,
    /// Current state of the PR
    pub state: PrState,
    /// Whether PR is a draft
    pub is_draft: bool,
}

impl From<&PullRequestDetails> for PrSummary {
    fn from(pr: &PullRequestDetails) -> Self {
        Self {
            number: pr.number,
            title: pr.title.clone(),
            head_ref: pr.head_ref.clone(),
            base_ref: pr.base_ref.clone(),
            state: pr.state,
            is_draft: pr.is_draft,
        }
    }
}

/// A comment on a pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrComment {
    /// Comment ID
    pub id: u64,
    /// GraphQL node ID (used to minimize the comment)
    pub node_id: String,
    /// Comment body text
    pub body: String,
}
