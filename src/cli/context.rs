//! Shared command context
//!
//! Resolves everything a check needs before talking to GitHub.

use crate::cli::check::CheckArgs;
use ready_or_not::auth::get_github_auth;
use ready_or_not::config::{Config, load_config};
use ready_or_not::error::Result;
use ready_or_not::platform::{
    GitHubService, PlatformService, detect_pr_number, detect_repo, detect_repo_root,
    parse_repo_slug,
};
use ready_or_not::types::PlatformConfig;
use tracing::debug;

/// Resolved setup for one evaluation
///
/// This struct encapsulates the setup shared by printing and posting:
/// - Loading configuration
/// - Resolving the repository (flag or `origin` remote)
/// - Resolving the token (environment or `gh`)
/// - Resolving the PR (flag or current branch)
/// - Creating the platform service
pub struct CommandContext {
    /// Platform service (GitHub)
    pub platform: Box<dyn PlatformService>,
    /// Loaded configuration
    pub config: Config,
    /// PR to evaluate
    pub pr_number: u64,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(args: &CheckArgs) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let repo_root = detect_repo_root(&cwd);
        debug!(root = %repo_root.display(), "resolved repository root");
        let config = load_config(args.config.as_deref(), &repo_root)?;

        let host = args
            .host
            .clone()
            .or_else(|| std::env::var("GH_HOST").ok().filter(|h| !h.is_empty()));

        let repo: PlatformConfig = match args.repo {
            Some(ref slug) => parse_repo_slug(slug, host)?,
            None => {
                let mut detected = detect_repo()?;
                if host.is_some() {
                    detected.host = host;
                }
                detected
            }
        };
        debug!(owner = %repo.owner, repo = %repo.repo, host = ?repo.host, "resolved repository");

        let auth = get_github_auth(repo.host.as_deref())?;
        debug!(source = %auth.source, "resolved GitHub token");

        let pr_number = match args.pr {
            Some(n) => n,
            None => detect_pr_number(&repo)?,
        };

        let platform = Box::new(GitHubService::new(
            &auth.token,
            repo.owner,
            repo.repo,
            repo.host,
        )?);

        Ok(Self {
            platform,
            config,
            pr_number,
        })
    }

    /// Self-check name: flag wins over config
    pub fn self_check_name(&self, args: &CheckArgs) -> Option<String> {
        args.self_check
            .clone()
            .or_else(|| self.config.self_check_name.clone())
    }
}
