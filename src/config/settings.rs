//! Immutable run settings, built once at startup.
use std::path::{Path, PathBuf};

use super::Config;
use crate::reconcile::classify::PolicyMode;
use crate::reconcile::paths::{self, LinkPaths, TrackedFile};

/// Everything a run needs to know, resolved up front and passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The user's home directory.
    pub home: PathBuf,
    /// Clone directory relative to `home`.
    pub repo_dir: PathBuf,
    /// Remote repository reference.
    pub remote: String,
    /// Host probed before syncing when `online_gate` is set.
    pub ping_host: Option<String>,
    /// External diff/merge command.
    pub diff_tool: String,
    /// Conflict policy for this run.
    pub policy: PolicyMode,
    /// Show skip narration and debug output.
    pub verbose: bool,
    /// Only sync when the probe host answers.
    pub online_gate: bool,
}

impl Settings {
    /// Combine loaded configuration with the home directory and CLI flags.
    #[must_use]
    pub fn new(
        config: Config,
        home: PathBuf,
        policy: PolicyMode,
        verbose: bool,
        online_gate: bool,
    ) -> Self {
        Self {
            home,
            repo_dir: PathBuf::from(config.repo_dir),
            remote: config.remote,
            ping_host: config.ping_host,
            diff_tool: config.diff_tool,
            policy,
            verbose,
            online_gate,
        }
    }

    /// Absolute path of the local clone.
    #[must_use]
    pub fn repo_root(&self) -> PathBuf {
        self.home.join(&self.repo_dir)
    }

    /// Absolute path of a program's subtree inside the clone.
    #[must_use]
    pub fn program_dir(&self, program: &str) -> PathBuf {
        self.repo_root().join(program)
    }

    /// Resolve a tracked file to its home and repository paths.
    #[must_use]
    pub fn resolve(&self, tracked: &TrackedFile) -> LinkPaths {
        paths::resolve(&self.home, &self.repo_dir, tracked)
    }

    /// Render `path` relative to the home directory as `~/...` when possible.
    #[must_use]
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.home).map_or_else(
            |_| path.display().to_string(),
            |rel| format!("~/{}", rel.display()),
        )
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        let config = Config {
            repo_dir: "DOT".to_string(),
            remote: "git@example.com:me/dots.git".to_string(),
            ping_host: None,
            diff_tool: "vimdiff".to_string(),
        };
        Settings::new(
            config,
            PathBuf::from("/home/user"),
            PolicyMode::Interactive,
            false,
            false,
        )
    }

    #[test]
    fn repo_root_is_under_home() {
        assert_eq!(settings().repo_root(), PathBuf::from("/home/user/DOT"));
    }

    #[test]
    fn program_dir_is_namespaced() {
        assert_eq!(
            settings().program_dir("vim"),
            PathBuf::from("/home/user/DOT/vim")
        );
    }

    #[test]
    fn display_path_uses_tilde() {
        let s = settings();
        assert_eq!(
            s.display_path(Path::new("/home/user/.vimrc")),
            "~/.vimrc".to_string()
        );
        assert_eq!(s.display_path(Path::new("/etc/hosts")), "/etc/hosts");
    }
}
