use crate::error::DotlinkError;
use crate::logging::Logger;
use crate::tasks::unlink::UnlinkProgram;
use crate::tasks::{self, Context};

/// Run unlink mode against the existing clone; no sync is attempted.
///
/// # Errors
///
/// Returns an error if there is no local clone or a copy fails part way.
pub fn run(ctx: &Context, log: &Logger, program: &str) -> Result<(), DotlinkError> {
    super::finish(log, tasks::execute(&UnlinkProgram::new(program), ctx))
}

#[cfg(all(test, unix))]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::exec::test_helpers::MockExecutor;
    use crate::resources::symlink::create_symlink;
    use crate::tasks::test_helpers::{make_context, seed_repo};
    use std::sync::Arc;

    #[test]
    fn never_touches_the_remote() {
        let home = tempfile::tempdir().unwrap();
        seed_repo(home.path(), &[("vim/.vimrc", "set nu")]);
        create_symlink(
            &home.path().join("DOT/vim/.vimrc"),
            &home.path().join(".vimrc"),
        )
        .unwrap();
        let exec = Arc::new(MockExecutor::default());
        let (ctx, log) = make_context(home.path());
        let ctx = ctx.with_executor(Arc::clone(&exec) as Arc<dyn crate::exec::Executor>);

        run(&ctx, &log, "vim").unwrap();
        assert!(exec.calls().is_empty());
        assert!(!home.path().join(".vimrc").is_symlink());
    }
}
