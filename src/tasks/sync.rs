use crate::error::{DotlinkError, SyncError};
use crate::probe;
use crate::status::{SyncStatus, write_status};
use crate::vcs::GitRepository;

use super::{Context, Task, TaskResult};

/// How a failed sync affects the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Any clone/pull failure stops the run.
    Required,
    /// Pull failures are tolerated when a local clone already exists.
    BestEffort,
}

/// Clone the repository if it is missing, otherwise fast-forward it.
///
/// With the online gate set, the configured host is pinged first and an
/// unreachable host skips the sync with a warning.  Every attempt writes the
/// sync status marker.
#[derive(Debug)]
pub struct SyncRepository {
    mode: SyncMode,
}

impl SyncRepository {
    /// Create the task.
    #[must_use]
    pub const fn new(mode: SyncMode) -> Self {
        Self { mode }
    }
}

fn mark(ctx: &Context, status: SyncStatus) {
    if let Some(dir) = &ctx.cache_dir
        && let Err(e) = write_status(dir, status)
    {
        ctx.log
            .debug(&format!("cannot write sync status to {}: {e}", dir.display()));
    }
}

impl Task for SyncRepository {
    fn name(&self) -> &str {
        "Sync repository"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult, DotlinkError> {
        let root = ctx.repo_root();
        let repo = GitRepository::new(ctx.executor.as_ref(), &root);
        let shown = ctx.display(&root);

        if ctx.settings.online_gate {
            match &ctx.settings.ping_host {
                Some(host) if !probe::is_reachable(ctx.executor.as_ref(), host) => {
                    ctx.log
                        .warn(&format!("{host} is unreachable; skipping repository sync"));
                    mark(ctx, SyncStatus::Skipped);
                    if !repo.is_cloned() {
                        return Err(SyncError::MissingClone { path: root }.into());
                    }
                    return Ok(TaskResult::Skipped(format!("{host} unreachable")));
                }
                Some(host) => ctx.log.debug(&format!("{host} is reachable")),
                None => ctx
                    .log
                    .debug("no ping_host configured; syncing without a probe"),
            }
        }

        let outcome = if repo.is_cloned() {
            repo.pull().map(|changed| {
                if changed {
                    ctx.log.info(&format!("pulled new changes into {shown}"));
                } else {
                    ctx.log.debug(&format!("{shown} is up to date"));
                }
            })
        } else {
            repo.clone_from(&ctx.settings.remote).map(|()| {
                ctx.log
                    .info(&format!("cloned {} into {shown}", ctx.settings.remote));
            })
        };

        match outcome {
            Ok(()) => {
                mark(ctx, SyncStatus::Ok);
                Ok(TaskResult::Ok)
            }
            Err(e) => {
                mark(ctx, SyncStatus::Failed);
                if self.mode == SyncMode::BestEffort && repo.is_cloned() {
                    ctx.log
                        .warn(&format!("{e}; continuing with the existing clone"));
                    Ok(TaskResult::Skipped(e.to_string()))
                } else {
                    Err(e.into())
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::exec::Executor;
    use crate::exec::test_helpers::MockExecutor;
    use crate::status::read_status;
    use crate::tasks::test_helpers::{make_context, seed_repo};
    use std::sync::Arc;

    fn gated(ctx: Context) -> Context {
        let mut settings = Settings::clone(&ctx.settings);
        settings.online_gate = true;
        Context {
            settings: Arc::new(settings),
            ..ctx
        }
    }

    fn with_exec(ctx: Context, exec: &Arc<MockExecutor>) -> Context {
        ctx.with_executor(Arc::clone(exec) as Arc<dyn Executor>)
    }

    #[test]
    fn clones_when_missing() {
        let home = tempfile::tempdir().unwrap();
        let cache = tempfile::tempdir().unwrap();
        let exec = Arc::new(MockExecutor::default());
        let (ctx, _log) = make_context(home.path());
        let ctx = with_exec(ctx, &exec).with_cache_dir(Some(cache.path().to_path_buf()));

        let result = SyncRepository::new(SyncMode::Required).run(&ctx).unwrap();
        assert_eq!(result, TaskResult::Ok);
        assert!(exec.calls()[0].starts_with("git clone git@example.com:me/dot.git "));
        assert_eq!(read_status(cache.path()), Some(SyncStatus::Ok));
    }

    #[test]
    fn pulls_when_cloned() {
        let home = tempfile::tempdir().unwrap();
        seed_repo(home.path(), &[]);
        let exec = Arc::new(MockExecutor::ok("Already up to date.\n"));
        let (ctx, _log) = make_context(home.path());
        let ctx = with_exec(ctx, &exec);

        SyncRepository::new(SyncMode::Required).run(&ctx).unwrap();
        assert_eq!(exec.calls(), vec!["git pull --ff-only"]);
    }

    #[test]
    fn required_sync_failure_is_fatal() {
        let home = tempfile::tempdir().unwrap();
        seed_repo(home.path(), &[]);
        let cache = tempfile::tempdir().unwrap();
        let exec = Arc::new(MockExecutor::fail());
        let (ctx, _log) = make_context(home.path());
        let ctx = with_exec(ctx, &exec).with_cache_dir(Some(cache.path().to_path_buf()));

        let err = SyncRepository::new(SyncMode::Required).run(&ctx).unwrap_err();
        assert_eq!(err.exit_code(), 1);
        assert_eq!(read_status(cache.path()), Some(SyncStatus::Failed));
    }

    #[test]
    fn best_effort_tolerates_pull_failure_with_existing_clone() {
        let home = tempfile::tempdir().unwrap();
        seed_repo(home.path(), &[]);
        let exec = Arc::new(MockExecutor::fail());
        let (ctx, _log) = make_context(home.path());
        let ctx = with_exec(ctx, &exec);

        let result = SyncRepository::new(SyncMode::BestEffort).run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Skipped(_)));
    }

    #[test]
    fn best_effort_still_fails_without_clone() {
        let home = tempfile::tempdir().unwrap();
        let exec = Arc::new(MockExecutor::fail());
        let (ctx, _log) = make_context(home.path());
        let ctx = with_exec(ctx, &exec);

        assert!(SyncRepository::new(SyncMode::BestEffort).run(&ctx).is_err());
    }

    #[test]
    fn unreachable_host_skips_sync_but_keeps_clone() {
        let home = tempfile::tempdir().unwrap();
        seed_repo(home.path(), &[]);
        let cache = tempfile::tempdir().unwrap();
        let exec = Arc::new(MockExecutor::fail());
        let (ctx, _log) = make_context(home.path());
        let ctx = gated(with_exec(ctx, &exec)).with_cache_dir(Some(cache.path().to_path_buf()));

        let result = SyncRepository::new(SyncMode::Required).run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::Skipped(_)));
        assert_eq!(exec.calls().len(), 1, "only the ping should run");
        assert!(exec.calls()[0].starts_with("ping"));
        assert_eq!(read_status(cache.path()), Some(SyncStatus::Skipped));
    }

    #[test]
    fn unreachable_host_without_clone_is_fatal() {
        let home = tempfile::tempdir().unwrap();
        let exec = Arc::new(MockExecutor::fail());
        let (ctx, _log) = make_context(home.path());
        let ctx = gated(with_exec(ctx, &exec));

        let err = SyncRepository::new(SyncMode::Required).run(&ctx).unwrap_err();
        assert!(matches!(
            err,
            DotlinkError::Sync(SyncError::MissingClone { .. })
        ));
    }

    #[test]
    fn reachable_host_syncs() {
        let home = tempfile::tempdir().unwrap();
        seed_repo(home.path(), &[]);
        let exec = Arc::new(MockExecutor::default());
        let (ctx, _log) = make_context(home.path());
        let ctx = gated(with_exec(ctx, &exec));

        SyncRepository::new(SyncMode::Required).run(&ctx).unwrap();
        assert_eq!(exec.calls().len(), 2);
        assert_eq!(exec.calls()[1], "git pull --ff-only");
    }
}
