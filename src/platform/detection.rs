//! Repository and pull request detection
//!
//! Resolves which repository and PR to evaluate when they are not given
//! explicitly, using the `origin` remote and the `gh` CLI.

use crate::error::{Error, Result};
use crate::types::PlatformConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;
use tracing::debug;

const GITHUB_HOST: &str = "github.com";

/// `git@host:owner/repo(.git)`
static SSH_REMOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:ssh://)?[^@/\s]+@([^:/\s]+)[:/](.+)$").expect("valid regex")
});

/// Parse a git remote URL into GitHub repository coordinates.
///
/// Accepts SSH (`git@github.com:owner/repo.git`) and HTTPS
/// (`https://github.com/owner/repo`) forms. Hosts other than github.com are
/// treated as GitHub Enterprise.
pub fn parse_repo_info(remote_url: &str) -> Result<PlatformConfig> {
    let trimmed = remote_url.trim();

    let (host, path) = if let Some(caps) = SSH_REMOTE.captures(trimmed) {
        (caps[1].to_string(), caps[2].to_string())
    } else {
        let url = url::Url::parse(trimmed)
            .map_err(|_| Error::NoSupportedRemote(remote_url.to_string()))?;
        if !matches!(url.scheme(), "https" | "http" | "ssh" | "git") {
            return Err(Error::NoSupportedRemote(remote_url.to_string()));
        }
        let host = url
            .host_str()
            .ok_or_else(|| Error::NoSupportedRemote(remote_url.to_string()))?
            .to_string();
        (host, url.path().to_string())
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let (owner, repo) = split_slug(path).ok_or_else(|| Error::NoSupportedRemote(remote_url.to_string()))?;

    Ok(PlatformConfig {
        owner,
        repo,
        host: (host != GITHUB_HOST).then_some(host),
    })
}

/// Parse an explicit `owner/repo` value
pub fn parse_repo_slug(slug: &str, host: Option<String>) -> Result<PlatformConfig> {
    let (owner, repo) = split_slug(slug.trim()).ok_or_else(|| Error::InvalidRepo(slug.to_string()))?;
    Ok(PlatformConfig { owner, repo, host })
}

fn split_slug(path: &str) -> Option<(String, String)> {
    let (owner, repo) = path.split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}

/// Top of the git worktree containing `dir`.
///
/// Falls back to `dir` itself when it is not inside a worktree or `git` is
/// unavailable.
pub fn detect_repo_root(dir: &Path) -> PathBuf {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(dir)
        .output();

    match output {
        Ok(output) if output.status.success() => {
            let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if root.is_empty() {
                dir.to_path_buf()
            } else {
                PathBuf::from(root)
            }
        }
        _ => {
            debug!(dir = %dir.display(), "not inside a git worktree, using directory as repo root");
            dir.to_path_buf()
        }
    }
}

/// Detect the repository from the `origin` remote of the current directory
pub fn detect_repo() -> Result<PlatformConfig> {
    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .output()?;

    if !output.status.success() {
        return Err(Error::NoSupportedRemote(
            "no 'origin' remote; use --repo owner/repo".to_string(),
        ));
    }

    let remote = String::from_utf8_lossy(&output.stdout).trim().to_string();
    debug!(remote = %remote, "detected origin remote");
    parse_repo_info(&remote)
}

/// Detect the PR for the current branch via `gh pr view`
pub fn detect_pr_number(config: &PlatformConfig) -> Result<u64> {
    let mut cmd = Command::new("gh");
    cmd.args(["pr", "view", "--json", "number", "-q", ".number"]);
    cmd.args(["--repo", &format!("{}/{}", config.owner, config.repo)]);
    if let Some(ref host) = config.host {
        cmd.env("GH_HOST", host);
    }

    let output = cmd
        .output()
        .map_err(|e| Error::PrDetection(format!("failed to run gh: {e}; use --pr NUMBER")))?;

    if !output.status.success() {
        return Err(Error::PrDetection(
            "no PR for the current branch; use --pr NUMBER".to_string(),
        ));
    }

    let text = String::from_utf8_lossy(&output.stdout);
    let number = text
        .trim()
        .parse()
        .map_err(|_| Error::PrDetection(format!("unexpected gh output '{}'", text.trim())))?;
    debug!(pr_number = number, "detected PR for current branch");
    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enterprise_host_is_kept() {
        let config = parse_repo_info("git@github.example.com:team/service.git").unwrap();
        assert_eq!(config.host.as_deref(), Some("github.example.com"));
        assert_eq!(config.owner, "team");
        assert_eq!(config.repo, "service");
    }

    #[test]
    fn test_ssh_scheme_url() {
        let config = parse_repo_info("ssh://git@github.com/owner/repo.git").unwrap();
        assert_eq!(config.host, None);
        assert_eq!(config.owner, "owner");
        assert_eq!(config.repo, "repo");
    }

    #[test]
    fn test_split_slug_rejects_nested_paths() {
        assert!(split_slug("a/b/c").is_none());
        assert!(split_slug("/b").is_none());
        assert!(split_slug("a/").is_none());
        assert_eq!(split_slug("a/b"), Some(("a".to_string(), "b".to_string())));
    }
}
