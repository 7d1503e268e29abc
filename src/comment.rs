//! Publishing the readiness report as a PR comment
//!
//! Each report carries a hidden marker so earlier reports can be found and
//! collapsed when a new one is posted.

use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::PrComment;
use tracing::{debug, info};

/// Default marker tag embedded in report comments
pub const DEFAULT_COMMENT_TAG: &str = "ready-or-not-marker";

/// Options for posting a report
#[derive(Debug, Clone)]
pub struct PostOptions {
    /// Marker tag identifying report comments
    pub tag: String,
    /// Minimize earlier reports before posting
    pub hide_previous: bool,
    /// Add a thumbs-up reaction when every gate passed
    pub react_when_ready: bool,
}

impl Default for PostOptions {
    fn default() -> Self {
        Self {
            tag: DEFAULT_COMMENT_TAG.to_string(),
            hide_previous: true,
            react_when_ready: true,
        }
    }
}

/// Outcome of posting a report
#[derive(Debug, Clone)]
pub struct PostedReport {
    /// The new comment
    pub comment: PrComment,
    /// Number of earlier reports minimized
    pub hidden: usize,
    /// Whether a reaction was added
    pub reacted: bool,
}

/// HTML comment marker for a tag
pub fn comment_marker(tag: &str) -> String {
    format!("<!-- {tag} -->")
}

/// Comment body: marker line followed by the chart
pub fn build_comment_body(chart: &str, tag: &str) -> String {
    format!("{}\n{chart}", comment_marker(tag))
}

/// Minimize every comment carrying the marker, returning how many were hidden
pub async fn hide_old_comments(
    platform: &dyn PlatformService,
    pr_number: u64,
    tag: &str,
) -> Result<usize> {
    let marker = comment_marker(tag);
    let comments = platform.list_pr_comments(pr_number).await?;

    let mut hidden = 0;
    for comment in comments.iter().filter(|c| c.body.contains(&marker)) {
        platform.minimize_comment(&comment.node_id).await?;
        hidden += 1;
    }

    debug!(pr_number, hidden, "hid previous reports");
    Ok(hidden)
}

/// Post a report comment, hiding earlier ones and reacting as configured
pub async fn post_report(
    platform: &dyn PlatformService,
    pr_number: u64,
    chart: &str,
    all_passed: bool,
    options: &PostOptions,
) -> Result<PostedReport> {
    let hidden = if options.hide_previous {
        hide_old_comments(platform, pr_number, &options.tag).await?
    } else {
        0
    };

    let body = build_comment_body(chart, &options.tag);
    let comment = platform.create_pr_comment(pr_number, &body).await?;

    let reacted = options.react_when_ready && all_passed;
    if reacted {
        platform.add_comment_reaction(comment.id).await?;
    }

    info!(pr_number, comment_id = comment.id, hidden, reacted, "posted readiness report");
    Ok(PostedReport {
        comment,
        hidden,
        reacted,
    })
}
