//! Git collaborator: clone, fast-forward pull and staging.
//!
//! All operations shell out to the `git` CLI through an [`Executor`]. Nothing
//! here ever commits; committing staged files is left to the operator.
use std::path::Path;

use crate::error::SyncError;
use crate::exec::Executor;

/// A local clone of the dotfiles repository.
#[derive(Debug, Clone, Copy)]
pub struct GitRepository<'a> {
    executor: &'a dyn Executor,
    dir: &'a Path,
}

impl<'a> GitRepository<'a> {
    /// Wrap the clone at `dir`.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor, dir: &'a Path) -> Self {
        Self { executor, dir }
    }

    /// `true` if the clone directory exists and contains a `.git` entry.
    #[must_use]
    pub fn is_cloned(&self) -> bool {
        self.dir.join(".git").exists()
    }

    /// Clone `remote` into the clone directory.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Clone`] if `git clone` fails.
    pub fn clone_from(&self, remote: &str) -> Result<(), SyncError> {
        let dir = self.dir.to_string_lossy();
        self.executor
            .run("git", &["clone", remote, &dir])
            .map_err(|e| SyncError::Clone {
                remote: remote.to_string(),
                reason: format!("{e:#}"),
            })?;
        Ok(())
    }

    /// Fast-forward the clone from its upstream.
    ///
    /// Returns `true` if new commits were pulled.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Pull`] if `git pull --ff-only` fails.
    pub fn pull(&self) -> Result<bool, SyncError> {
        let result = self
            .executor
            .run_in(self.dir, "git", &["pull", "--ff-only"])
            .map_err(|e| SyncError::Pull {
                path: self.dir.to_path_buf(),
                reason: format!("{e:#}"),
            })?;
        Ok(!result.stdout.contains("Already up to date"))
    }

    /// Stage `path` for the next commit.
    ///
    /// `path` may be absolute (inside the clone) or relative to the clone.
    ///
    /// # Errors
    ///
    /// Returns an error if `git add` fails.
    pub fn stage(&self, path: &Path) -> anyhow::Result<()> {
        let relative = path.strip_prefix(self.dir).unwrap_or(path);
        let relative = relative.to_string_lossy();
        self.executor
            .run_in(self.dir, "git", &["add", "--", &relative])?;
        Ok(())
    }
}
