//! User configuration: where the clone lives and where it comes from.
pub mod settings;
pub mod toml_loader;

pub use settings::Settings;

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Default clone directory, relative to the home directory.
pub const DEFAULT_REPO_DIR: &str = "DOT";

/// Default external merge tool.
pub const DEFAULT_DIFF_TOOL: &str = "vimdiff";

/// Raw contents of `config.toml`; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    repo_dir: Option<String>,
    remote: Option<String>,
    ping_host: Option<String>,
    diff_tool: Option<String>,
}

/// Configuration after merging the user file over compiled-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Clone directory, relative to the home directory.
    pub repo_dir: String,
    /// Remote repository reference (URL or `host:path`).
    pub remote: String,
    /// Host probed before syncing when `--online` is given.
    pub ping_host: Option<String>,
    /// Command invoked as `<diff_tool> <local> <repository>`.
    pub diff_tool: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo_dir: DEFAULT_REPO_DIR.to_string(),
            remote: option_env!("DOTLINK_REMOTE").unwrap_or_default().to_string(),
            ping_host: option_env!("DOTLINK_PING_HOST").map(str::to_string),
            diff_tool: DEFAULT_DIFF_TOOL.to_string(),
        }
    }
}

impl Config {
    /// Load `path` (if present) over the compiled-in defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// merged configuration fails [`Config::validate`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml_loader::load_config(path)?;
        let defaults = Self::default();
        let config = Self {
            repo_dir: file.repo_dir.unwrap_or(defaults.repo_dir),
            remote: file.remote.unwrap_or(defaults.remote),
            ping_host: file
                .ping_host
                .filter(|h| !h.trim().is_empty())
                .or(defaults.ping_host),
            diff_tool: file
                .diff_tool
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(defaults.diff_tool),
        };
        config.validate(path)?;
        Ok(config)
    }

    /// Check that the clone directory and remote are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for an empty clone directory or
    /// remote, and [`ConfigError::NotRelative`] for an absolute clone
    /// directory.
    pub fn validate(&self, source: &Path) -> Result<(), ConfigError> {
        let hint = source.display().to_string();
        if self.repo_dir.trim().is_empty() {
            return Err(ConfigError::Missing {
                key: "repo_dir",
                hint,
            });
        }
        if Path::new(&self.repo_dir).is_absolute() {
            return Err(ConfigError::NotRelative {
                key: "repo_dir",
                value: self.repo_dir.clone(),
            });
        }
        if self.remote.trim().is_empty() {
            return Err(ConfigError::Missing { key: "remote", hint });
        }
        Ok(())
    }
}

/// Locate the user config file.
///
/// `$DOTLINK_CONFIG` wins, then `$XDG_CONFIG_HOME/dotlink/config.toml`, then
/// `<home>/.config/dotlink/config.toml`.
#[must_use]
pub fn config_path(home: &Path) -> PathBuf {
    if let Ok(explicit) = std::env::var("DOTLINK_CONFIG")
        && !explicit.is_empty()
    {
        return PathBuf::from(explicit);
    }
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map_or_else(|| home.join(".config"), PathBuf::from)
        .join("dotlink")
        .join("config.toml")
}

/// Return the user's home directory.
///
/// # Errors
///
/// Returns [`ConfigError::HomeNotSet`] if neither `HOME` nor `USERPROFILE`
/// is set.
pub fn home_dir() -> Result<PathBuf, ConfigError> {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .ok_or(ConfigError::HomeNotSet)
}
