//! Optional configuration file
//!
//! Looked up at an explicit path, then `.github/ready-or-not.toml` in the
//! working directory, then `ready-or-not/config.toml` in the user config dir.
//! Command-line flags override anything set here.

use crate::comment::{DEFAULT_COMMENT_TAG, PostOptions};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config file name inside a repository's `.github/` directory
const REPO_CONFIG_FILE: &str = "ready-or-not.toml";

/// Directory and file name inside the user config dir
const USER_CONFIG_DIR: &str = "ready-or-not";
const USER_CONFIG_FILE: &str = "config.toml";

/// Settings read from the config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Check run name to exclude from the checks gate
    pub self_check_name: Option<String>,
    /// Marker tag for report comments
    pub comment_tag: String,
    /// Minimize earlier reports when posting
    pub hide_previous: bool,
    /// React with a thumbs up when every gate passed
    pub react_when_ready: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            self_check_name: None,
            comment_tag: DEFAULT_COMMENT_TAG.to_string(),
            hide_previous: true,
            react_when_ready: true,
        }
    }
}

impl Config {
    /// Comment posting options derived from this config
    pub fn post_options(&self) -> PostOptions {
        PostOptions {
            tag: self.comment_tag.clone(),
            hide_previous: self.hide_previous,
            react_when_ready: self.react_when_ready,
        }
    }
}

/// Path of the repository-level config file under `root`
pub fn repo_config_path(root: &Path) -> PathBuf {
    root.join(".github").join(REPO_CONFIG_FILE)
}

/// Path of the user-level config file, if the platform has a config dir
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE))
}

/// Load a config file.
///
/// Returns defaults if the file doesn't exist.
pub fn load_config_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("failed to read {}: {e}", path.display())))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Resolve and load configuration.
///
/// An explicit path must exist; otherwise the first existing file among the
/// repository and user locations is used, falling back to defaults.
pub fn load_config(explicit: Option<&Path>, repo_root: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Config(format!("{} does not exist", path.display())));
        }
        return load_config_file(path);
    }

    let candidates = std::iter::once(repo_config_path(repo_root)).chain(user_config_path());
    for path in candidates {
        if path.exists() {
            return load_config_file(&path);
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config_file(&temp.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_repo_config_is_picked_up() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".github")).unwrap();
        fs::write(
            repo_config_path(temp.path()),
            "self_check_name = \"readiness\"\nhide_previous = false\n",
        )
        .unwrap();

        let config = load_config(None, temp.path()).unwrap();
        assert_eq!(config.self_check_name.as_deref(), Some("readiness"));
        assert!(!config.hide_previous);
        assert_eq!(config.comment_tag, DEFAULT_COMMENT_TAG);
        assert!(config.react_when_ready);
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let temp = TempDir::new().unwrap();
        let result = load_config(Some(&temp.path().join("missing.toml")), temp.path());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        fs::write(&path, "hide_previous = \"sometimes\"\n").unwrap();
        assert!(matches!(load_config_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("typo.toml");
        fs::write(&path, "self_check = \"readiness\"\n").unwrap();
        assert!(matches!(load_config_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_post_options_follow_config() {
        let config = Config {
            comment_tag: "custom".to_string(),
            react_when_ready: false,
            ..Config::default()
        };
        let options = config.post_options();
        assert_eq!(options.tag, "custom");
        assert!(options.hide_previous);
        assert!(!options.react_when_ready);
    }
}
