use crate::error::DotlinkError;
use crate::reconcile::walker::reconcile_program;

use super::{Context, Task, TaskResult};

/// Reconcile every tracked file of one program.
#[derive(Debug)]
pub struct LinkProgram {
    program: String,
}

impl LinkProgram {
    /// Create the task for `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Task for LinkProgram {
    fn name(&self) -> &str {
        &self.program
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.settings.program_dir(&self.program).is_dir()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult, DotlinkError> {
        match reconcile_program(&self.program, ctx) {
            Ok(stats) => Ok(stats.finish("linked")),
            Err(e) => {
                ctx.log.error(&format!("{}: {e:#}", self.program));
                Ok(TaskResult::Skipped(format!("{e:#}")))
            }
        }
    }
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tasks::test_helpers::{make_context, seed_repo};

    #[test]
    fn links_and_summarises() {
        let home = tempfile::tempdir().unwrap();
        seed_repo(home.path(), &[("vim/.vimrc", "set nu")]);
        let (ctx, _log) = make_context(home.path());

        let task = LinkProgram::new("vim");
        assert!(task.should_run(&ctx));
        assert_eq!(
            task.run(&ctx).unwrap(),
            TaskResult::Summary("1 linked, 0 already ok".to_string())
        );
        assert!(home.path().join(".vimrc").is_symlink());
    }

    #[test]
    fn vanished_program_does_not_run() {
        let home = tempfile::tempdir().unwrap();
        seed_repo(home.path(), &[]);
        let (ctx, _log) = make_context(home.path());
        assert!(!LinkProgram::new("gone").should_run(&ctx));
    }
}
