use crate::error::DotlinkError;
use crate::logging::Logger;
use crate::reconcile::walker;
use crate::tasks::link::LinkProgram;
use crate::tasks::sync::{SyncMode, SyncRepository};
use crate::tasks::{self, Context};

/// Run the reconciliation sweep: sync the clone, then link every program.
///
/// # Errors
///
/// Returns an error if the repository cannot be synced or its programs
/// cannot be listed.  Per-file problems are logged and never fail the run.
pub fn run(ctx: &Context, log: &Logger) -> Result<(), DotlinkError> {
    super::finish(log, sweep(ctx))
}

fn sweep(ctx: &Context) -> Result<(), DotlinkError> {
    tasks::execute(&SyncRepository::new(SyncMode::Required), ctx)?;

    let root = ctx.repo_root();
    let programs = walker::programs(&root)
        .map_err(|e| DotlinkError::Io {
            context: format!("cannot list programs in {}", ctx.display(&root)),
            source: std::io::Error::other(format!("{e:#}")),
        })
        .inspect_err(|e| ctx.log.error(&e.to_string()))?;
    if programs.is_empty() {
        ctx.log
            .info(&format!("{} tracks no programs yet", ctx.display(&root)));
    }
    ctx.log.debug(&format!(
        "{} program(s), policy {}",
        programs.len(),
        ctx.settings.policy
    ));

    for program in programs {
        tasks::execute(&LinkProgram::new(program), ctx)?;
    }
    Ok(())
}
