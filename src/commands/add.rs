use std::path::PathBuf;

use crate::error::DotlinkError;
use crate::logging::Logger;
use crate::tasks::add::AddFiles;
use crate::tasks::sync::{SyncMode, SyncRepository};
use crate::tasks::{self, Context};

/// Run add mode: best-effort sync, then move `files` under `program`.
///
/// # Errors
///
/// Returns an error if there is no local clone and none could be made.
pub fn run(
    ctx: &Context,
    log: &Logger,
    program: &str,
    files: Vec<PathBuf>,
) -> Result<(), DotlinkError> {
    let outcome = tasks::execute(&SyncRepository::new(SyncMode::BestEffort), ctx)
        .and_then(|()| tasks::execute(&AddFiles::new(program, files), ctx));
    super::finish(log, outcome)
}
