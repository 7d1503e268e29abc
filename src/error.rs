//! Error types for ready-or-not

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while gathering readiness signals or reporting results
///
/// Gate evaluation and chart synthesis never fail; every variant here comes
/// from an adapter (GitHub API, auth, git/gh detection, config).
#[derive(Debug, Error)]
pub enum Error {
    /// GitHub API request failed or returned an unexpected payload
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// The pull request does not exist (or is not visible to the token)
    #[error("pull request #{0} not found")]
    PrNotFound(u64),

    /// No usable GitHub token
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The git remote is not a GitHub repository
    #[error("no supported GitHub remote found: {0}")]
    NoSupportedRemote(String),

    /// Could not determine the pull request for the current branch
    #[error("could not detect pull request: {0}")]
    PrDetection(String),

    /// `--repo` value is not of the form `owner/repo`
    #[error("invalid repository '{0}': expected owner/repo")]
    InvalidRepo(String),

    /// Configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// A fetch failed, so no readiness verdict could be produced
    #[error("evaluation of PR #{pr_number} failed: {source}")]
    EvaluationFailed {
        /// PR being evaluated
        pr_number: u64,
        /// Underlying fetch failure
        #[source]
        source: Box<Error>,
    },

    /// Unexpected internal failure
    #[error("internal error: {0}")]
    Internal(String),

    /// I/O failure (spawning git/gh, reading files)
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        Self::GitHubApi(err.to_string())
    }
}

impl Error {
    /// Wrap a fetch failure as an aborted evaluation of `pr_number`
    pub fn evaluation_failed(pr_number: u64, source: Self) -> Self {
        Self::EvaluationFailed {
            pr_number,
            source: Box::new(source),
        }
    }
}
