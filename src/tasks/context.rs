use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Settings;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::Log;
use crate::operations::{FileSystemOps, SystemFileSystemOps};
use crate::reconcile::prompt::{Prompter, TerminalPrompter};

/// Shared context for task execution.
pub struct Context {
    /// Immutable run settings.
    pub settings: Arc<Settings>,
    /// Logger for output and task recording.
    pub log: Arc<dyn Log>,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    /// Filesystem inspection (injectable for testing).
    pub fs_ops: Arc<dyn FileSystemOps>,
    /// Operator prompts (injectable for testing).
    pub prompter: Arc<dyn Prompter>,
    /// Where the sync status marker is written; `None` disables it.
    pub cache_dir: Option<PathBuf>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("settings", &self.settings)
            .field("log", &"<dyn Log>")
            .field("executor", &self.executor)
            .field("fs_ops", &self.fs_ops)
            .field("prompter", &"<dyn Prompter>")
            .field("cache_dir", &self.cache_dir)
            .finish()
    }
}

impl Context {
    /// Creates a context that talks to the real system and terminal.
    #[must_use]
    pub fn new(settings: Arc<Settings>, log: Arc<dyn Log>) -> Self {
        Self {
            settings,
            log,
            executor: Arc::new(SystemExecutor),
            fs_ops: Arc::new(SystemFileSystemOps),
            prompter: Arc::new(TerminalPrompter),
            cache_dir: crate::logging::cache_dir(),
        }
    }

    /// Replace the command executor.
    #[must_use]
    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = executor;
        self
    }

    /// Replace the [`FileSystemOps`] implementation.
    #[must_use]
    pub fn with_fs_ops(mut self, fs_ops: Arc<dyn FileSystemOps>) -> Self {
        self.fs_ops = fs_ops;
        self
    }

    /// Replace the operator prompter.
    #[must_use]
    pub fn with_prompter(mut self, prompter: Arc<dyn Prompter>) -> Self {
        self.prompter = prompter;
        self
    }

    /// Redirect (or disable) the sync status marker.
    #[must_use]
    pub fn with_cache_dir(mut self, cache_dir: Option<PathBuf>) -> Self {
        self.cache_dir = cache_dir;
        self
    }

    /// Root directory of the local clone.
    #[must_use]
    pub fn repo_root(&self) -> PathBuf {
        self.settings.repo_root()
    }

    /// Shorthand for [`Settings::display_path`].
    #[must_use]
    pub fn display(&self, path: &std::path::Path) -> String {
        self.settings.display_path(path)
    }
}
