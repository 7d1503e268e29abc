//! Mock platform service for testing
//!
//! These are test utilities - not all may be used in current tests but are
//! available for future test development.

#![allow(dead_code)]

use async_trait::async_trait;
use ready_or_not::error::{Error, Result};
use ready_or_not::platform::PlatformService;
use ready_or_not::types::{
    CheckRun, CompareCounts, PlatformConfig, PrComment, PrState, PullRequestDetails,
    ReviewThread, Reviewer,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Call record for `compare_commits`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareCall {
    pub base: String,
    pub head: String,
}

/// Call record for `create_pr_comment`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCommentCall {
    pub pr_number: u64,
    pub body: String,
}

/// Simple mock platform service for testing
///
/// This manually implements `PlatformService` rather than using mockall,
/// because mockall has issues with methods returning references.
///
/// Features:
/// - Healthy defaults (open PR, up to date, one passing check, no threads)
/// - Call tracking for verification
/// - Configurable responses
/// - Error injection for failure path testing
pub struct MockPlatformService {
    config: PlatformConfig,
    next_comment_id: AtomicU64,
    pr_details: Mutex<PullRequestDetails>,
    compare: Mutex<CompareCounts>,
    check_runs: Mutex<Vec<CheckRun>>,
    threads: Mutex<Vec<ReviewThread>>,
    comments: Mutex<Vec<PrComment>>,
    // Call tracking
    get_pr_calls: Mutex<Vec<u64>>,
    compare_calls: Mutex<Vec<CompareCall>>,
    check_run_calls: Mutex<Vec<String>>,
    thread_calls: Mutex<Vec<u64>>,
    list_comments_calls: Mutex<Vec<u64>>,
    create_comment_calls: Mutex<Vec<CreateCommentCall>>,
    minimize_calls: Mutex<Vec<String>>,
    reaction_calls: Mutex<Vec<u64>>,
    // Error injection
    error_on_get_pr: Mutex<Option<String>>,
    error_on_compare: Mutex<Option<String>>,
    error_on_check_runs: Mutex<Option<String>>,
    error_on_threads: Mutex<Option<String>>,
    error_on_create_comment: Mutex<Option<String>>,
}

/// Default PR returned by the mock
pub fn default_pr(number: u64) -> PullRequestDetails {
    PullRequestDetails {
        number,
        title: "Test PR".to_string(),
        state: PrState::Open,
        is_draft: false,
        head_ref: "feat/test".to_string(),
        head_sha: "abc123".to_string(),
        base_ref: "main".to_string(),
        html_url: format!("https://github.com/test/repo/pull/{number}"),
        requested_reviewers: vec![],
    }
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            next_comment_id: AtomicU64::new(1000),
            pr_details: Mutex::new(default_pr(1)),
            compare: Mutex::new(CompareCounts {
                behind_by: 0,
                ahead_by: 1,
            }),
            check_runs: Mutex::new(vec![CheckRun::new("CI", Some("success"), "completed")]),
            threads: Mutex::new(vec![]),
            comments: Mutex::new(vec![]),
            get_pr_calls: Mutex::new(Vec::new()),
            compare_calls: Mutex::new(Vec::new()),
            check_run_calls: Mutex::new(Vec::new()),
            thread_calls: Mutex::new(Vec::new()),
            list_comments_calls: Mutex::new(Vec::new()),
            create_comment_calls: Mutex::new(Vec::new()),
            minimize_calls: Mutex::new(Vec::new()),
            reaction_calls: Mutex::new(Vec::new()),
            error_on_get_pr: Mutex::new(None),
            error_on_compare: Mutex::new(None),
            error_on_check_runs: Mutex::new(None),
            error_on_threads: Mutex::new(None),
            error_on_create_comment: Mutex::new(None),
        }
    }

    // === Error injection methods ===

    /// Make `get_pr_details` return an error
    pub fn fail_get_pr(&self, msg: &str) {
        *self.error_on_get_pr.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `compare_commits` return an error
    pub fn fail_compare(&self, msg: &str) {
        *self.error_on_compare.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_check_runs` return an error
    pub fn fail_check_runs(&self, msg: &str) {
        *self.error_on_check_runs.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_review_threads` return an error
    pub fn fail_threads(&self, msg: &str) {
        *self.error_on_threads.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `create_pr_comment` return an error
    pub fn fail_create_comment(&self, msg: &str) {
        *self.error_on_create_comment.lock().unwrap() = Some(msg.to_string());
    }

    // === Response setup ===

    /// Set the PR returned by `get_pr_details`
    pub fn set_pr(&self, pr: PullRequestDetails) {
        *self.pr_details.lock().unwrap() = pr;
    }

    /// Mark the PR as draft / ready
    pub fn set_draft(&self, is_draft: bool) {
        self.pr_details.lock().unwrap().is_draft = is_draft;
    }

    /// Set requested reviewers
    pub fn set_reviewers(&self, logins: &[&str]) {
        self.pr_details.lock().unwrap().requested_reviewers =
            logins.iter().map(|l| Reviewer::new(*l)).collect();
    }

    /// Set ahead/behind counts
    pub fn set_compare(&self, behind_by: u64, ahead_by: u64) {
        *self.compare.lock().unwrap() = CompareCounts {
            behind_by,
            ahead_by,
        };
    }

    /// Set check runs
    pub fn set_check_runs(&self, runs: Vec<CheckRun>) {
        *self.check_runs.lock().unwrap() = runs;
    }

    /// Set review threads from resolution flags
    pub fn set_threads(&self, resolved: &[bool]) {
        *self.threads.lock().unwrap() = resolved
            .iter()
            .map(|r| ReviewThread { is_resolved: *r })
            .collect();
    }

    /// Set existing comments
    pub fn set_comments(&self, comments: Vec<PrComment>) {
        *self.comments.lock().unwrap() = comments;
    }

    // === Call inspection ===

    pub fn get_get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    pub fn get_compare_calls(&self) -> Vec<CompareCall> {
        self.compare_calls.lock().unwrap().clone()
    }

    pub fn get_check_run_calls(&self) -> Vec<String> {
        self.check_run_calls.lock().unwrap().clone()
    }

    pub fn get_thread_calls(&self) -> Vec<u64> {
        self.thread_calls.lock().unwrap().clone()
    }

    pub fn get_list_comments_calls(&self) -> Vec<u64> {
        self.list_comments_calls.lock().unwrap().clone()
    }

    pub fn get_create_comment_calls(&self) -> Vec<CreateCommentCall> {
        self.create_comment_calls.lock().unwrap().clone()
    }

    pub fn get_minimize_calls(&self) -> Vec<String> {
        self.minimize_calls.lock().unwrap().clone()
    }

    pub fn get_reaction_calls(&self) -> Vec<u64> {
        self.reaction_calls.lock().unwrap().clone()
    }

    fn injected(slot: &Mutex<Option<String>>) -> Result<()> {
        slot.lock()
            .unwrap()
            .clone()
            .map_or(Ok(()), |msg| Err(Error::GitHubApi(msg)))
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn get_pr_details(&self, pr_number: u64) -> Result<PullRequestDetails> {
        self.get_pr_calls.lock().unwrap().push(pr_number);
        Self::injected(&self.error_on_get_pr)?;

        let mut pr = self.pr_details.lock().unwrap().clone();
        pr.number = pr_number;
        pr.html_url = format!("https://github.com/test/repo/pull/{pr_number}");
        Ok(pr)
    }

    async fn compare_commits(&self, base: &str, head: &str) -> Result<CompareCounts> {
        self.compare_calls.lock().unwrap().push(CompareCall {
            base: base.to_string(),
            head: head.to_string(),
        });
        Self::injected(&self.error_on_compare)?;
        Ok(*self.compare.lock().unwrap())
    }

    async fn list_check_runs(&self, sha: &str) -> Result<Vec<CheckRun>> {
        self.check_run_calls.lock().unwrap().push(sha.to_string());
        Self::injected(&self.error_on_check_runs)?;
        Ok(self.check_runs.lock().unwrap().clone())
    }

    async fn list_review_threads(&self, pr_number: u64) -> Result<Vec<ReviewThread>> {
        self.thread_calls.lock().unwrap().push(pr_number);
        Self::injected(&self.error_on_threads)?;
        Ok(self.threads.lock().unwrap().clone())
    }

    async fn list_pr_comments(&self, pr_number: u64) -> Result<Vec<PrComment>> {
        self.list_comments_calls.lock().unwrap().push(pr_number);
        Ok(self.comments.lock().unwrap().clone())
    }

    async fn create_pr_comment(&self, pr_number: u64, body: &str) -> Result<PrComment> {
        self.create_comment_calls
            .lock()
            .unwrap()
            .push(CreateCommentCall {
                pr_number,
                body: body.to_string(),
            });
        Self::injected(&self.error_on_create_comment)?;

        let id = self.next_comment_id.fetch_add(1, Ordering::SeqCst);
        let comment = PrComment {
            id,
            node_id: format!("IC_node_{id}"),
            body: body.to_string(),
        };
        self.comments.lock().unwrap().push(comment.clone());
        Ok(comment)
    }

    async fn minimize_comment(&self, node_id: &str) -> Result<()> {
        self.minimize_calls.lock().unwrap().push(node_id.to_string());
        Ok(())
    }

    async fn add_comment_reaction(&self, comment_id: u64) -> Result<()> {
        self.reaction_calls.lock().unwrap().push(comment_id);
        Ok(())
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
