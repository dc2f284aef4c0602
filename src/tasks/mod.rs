//! Named tasks that drive repository sync and per-program reconciliation.
pub mod add;
pub mod context;
pub mod link;
pub mod sync;
pub mod unlink;

pub use context::Context;

use crate::error::DotlinkError;
use crate::logging::TaskStatus;

/// Outcome of a task that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Task completed successfully.
    Ok,
    /// Task completed; the message summarises what it did.
    Summary(String),
    /// Task was skipped on purpose.
    Skipped(String),
}

/// Counters for batch tasks that process many files.
///
/// # Examples
///
/// ```
/// use dotlink::tasks::TaskStats;
///
/// let stats = TaskStats { changed: 1, already_ok: 2, skipped: 0, failed: 0 };
/// assert_eq!(stats.summary("linked"), "1 linked, 2 already ok");
///
/// let stats = TaskStats { changed: 0, already_ok: 4, skipped: 1, failed: 2 };
/// assert_eq!(stats.summary("linked"), "0 linked, 4 already ok, 1 skipped, 2 failed");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
    /// Number of files created or replaced.
    pub changed: u32,
    /// Number of files already in the correct state.
    pub already_ok: u32,
    /// Number of files deliberately left alone.
    pub skipped: u32,
    /// Number of files that hit an anomaly or I/O error.
    pub failed: u32,
}

impl TaskStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary string; zero skip/failure counts are omitted.
    #[must_use]
    pub fn summary(&self, verb: &str) -> String {
        let mut out = format!("{} {verb}, {} already ok", self.changed, self.already_ok);
        if self.skipped > 0 {
            out.push_str(&format!(", {} skipped", self.skipped));
        }
        if self.failed > 0 {
            out.push_str(&format!(", {} failed", self.failed));
        }
        out
    }

    /// Wrap the summary in a [`TaskResult`].
    #[must_use]
    pub fn finish(self, verb: &str) -> TaskResult {
        TaskResult::Summary(self.summary(verb))
    }
}

/// A named, executable task.
pub trait Task {
    /// Human-readable task name.
    fn name(&self) -> &str;

    /// Whether this task applies to the current run.
    fn should_run(&self, _ctx: &Context) -> bool {
        true
    }

    /// Execute the task.
    ///
    /// Per-file problems are logged and counted inside the task; only
    /// failures that must stop the whole run are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the run cannot continue (sync failed, unlink copy
    /// failed, clone missing).
    fn run(&self, ctx: &Context) -> Result<TaskResult, DotlinkError>;
}

/// Execute a task, recording the result in the logger.
///
/// # Errors
///
/// Propagates the task's error after logging and recording it.
pub fn execute(task: &dyn Task, ctx: &Context) -> Result<(), DotlinkError> {
    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping task: {} (not applicable)", task.name()));
        ctx.log
            .record_task(task.name(), TaskStatus::NotApplicable, None);
        return Ok(());
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
            Ok(())
        }
        Ok(TaskResult::Summary(summary)) => {
            ctx.log.debug(&summary);
            ctx.log
                .record_task(task.name(), TaskStatus::Ok, Some(&summary));
            Ok(())
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.debug(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
            Ok(())
        }
        Err(e) => {
            ctx.log.error(&format!("{}: {e}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&e.to_string()));
            Err(e)
        }
    }
}
