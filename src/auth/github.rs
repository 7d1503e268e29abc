//! GitHub token resolution

use super::AuthSource;
use crate::error::{Error, Result};
use std::process::Command;
use tracing::debug;

/// Environment variables checked for a token, in order
const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Resolved GitHub credentials
#[derive(Debug, Clone)]
pub struct GitHubAuthConfig {
    /// API token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

/// Resolve a token from the process environment, falling back to `gh auth token`
pub fn get_github_auth(host: Option<&str>) -> Result<GitHubAuthConfig> {
    resolve_github_token(|name| std::env::var(name).ok(), || gh_auth_token(host))
}

/// Resolve a token from injectable sources.
///
/// Environment variables win over the CLI; blank values are ignored.
pub fn resolve_github_token<E, C>(env: E, cli: C) -> Result<GitHubAuthConfig>
where
    E: Fn(&str) -> Option<String>,
    C: FnOnce() -> Option<String>,
{
    for name in TOKEN_ENV_VARS {
        if let Some(token) = env(name).map(|t| t.trim().to_string())
            && !token.is_empty()
        {
            debug!(var = name, "using GitHub token from environment");
            return Ok(GitHubAuthConfig {
                token,
                source: AuthSource::EnvVar,
            });
        }
    }

    if let Some(token) = cli().map(|t| t.trim().to_string())
        && !token.is_empty()
    {
        debug!("using GitHub token from gh CLI");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Cli,
        });
    }

    Err(Error::Auth(
        "No GitHub token found. Set GITHUB_TOKEN or run `gh auth login`.".to_string(),
    ))
}

fn gh_auth_token(host: Option<&str>) -> Option<String> {
    let mut cmd = Command::new("gh");
    cmd.args(["auth", "token"]);
    if let Some(h) = host {
        cmd.args(["--hostname", h]);
    }

    let output = cmd.output().ok()?;
    if !output.status.success() {
        debug!(status = %output.status, "gh auth token failed");
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_token_wins_over_gh_token() {
        let auth = resolve_github_token(
            |name| match name {
                "GITHUB_TOKEN" => Some("ghp_primary".to_string()),
                "GH_TOKEN" => Some("ghp_secondary".to_string()),
                _ => None,
            },
            || panic!("cli should not be consulted"),
        )
        .unwrap();
        assert_eq!(auth.token, "ghp_primary");
        assert_eq!(auth.source, AuthSource::EnvVar);
    }

    #[test]
    fn test_blank_env_falls_back_to_cli() {
        let auth = resolve_github_token(
            |_| Some("   ".to_string()),
            || Some("gho_from_cli\n".to_string()),
        )
        .unwrap();
        assert_eq!(auth.token, "gho_from_cli");
        assert_eq!(auth.source, AuthSource::Cli);
    }

    #[test]
    fn test_no_token_is_auth_error() {
        let result = resolve_github_token(|_| None, || None);
        assert!(matches!(result, Err(Error::Auth(_))));
    }
}
