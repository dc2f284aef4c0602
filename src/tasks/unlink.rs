use crate::error::{AnomalyError, DotlinkError, SyncError};
use crate::reconcile::paths::validate_program_name;
use crate::reconcile::state::{LinkState, observe};
use crate::reconcile::walker::tracked_files;
use crate::resources::symlink::materialize;
use crate::vcs::GitRepository;

use super::{Context, Task, TaskResult, TaskStats};

/// Replace every link of a program with a real copy of its repository file.
///
/// Files are processed in sorted order.  A failed copy stops the run with the
/// earlier files already detached; re-running is safe because detached files
/// are reported as not linked and skipped.  The repository copies are never
/// touched.
#[derive(Debug)]
pub struct UnlinkProgram {
    program: String,
}

impl UnlinkProgram {
    /// Create the task for `program`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Task for UnlinkProgram {
    fn name(&self) -> &str {
        &self.program
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult, DotlinkError> {
        let root = ctx.repo_root();
        if !GitRepository::new(ctx.executor.as_ref(), &root).is_cloned() {
            return Err(SyncError::MissingClone { path: root }.into());
        }

        let program_dir = root.join(&self.program);
        let rejected = validate_program_name(&self.program).err().or_else(|| {
            (!program_dir.is_dir()).then(|| AnomalyError::UnknownProgram {
                program: self.program.clone(),
            })
        });
        if let Some(e) = rejected {
            ctx.log.error(&e.to_string());
            return Ok(TaskResult::Skipped(e.to_string()));
        }

        let files = tracked_files(&root, &self.program).map_err(|e| DotlinkError::Unlink {
            path: program_dir.clone(),
            reason: format!("{e:#}"),
        })?;

        let mut stats = TaskStats::new();
        for tracked in files {
            let paths = ctx.settings.resolve(&tracked);
            let anomaly = match observe(ctx.fs_ops.as_ref(), &paths, &root) {
                LinkState::CorrectSymlink => {
                    if let Err(e) = materialize(&paths.target, &paths.source) {
                        if stats.changed > 0 {
                            ctx.log.warn(&format!(
                                "{} file(s) of {} were already detached; fix the problem and run again",
                                stats.changed, self.program
                            ));
                        }
                        return Err(DotlinkError::Unlink {
                            path: paths.source,
                            reason: format!("{e:#}"),
                        });
                    }
                    ctx.log
                        .info(&format!("unlinked {}", ctx.display(&paths.source)));
                    stats.changed += 1;
                    continue;
                }
                LinkState::ForeignSymlink { current } => AnomalyError::WrongTarget {
                    path: paths.source,
                    actual: current,
                },
                LinkState::ViaLinkedParent { resolved } => AnomalyError::InsideRepository {
                    path: paths.source,
                    resolved,
                },
                LinkState::Absent | LinkState::RegularFile | LinkState::Other { .. } => {
                    AnomalyError::NotLinked { path: paths.source }
                }
            };
            ctx.log.error(&anomaly.to_string());
            stats.failed += 1;
        }

        if stats.changed > 0 {
            ctx.log.info(&format!(
                "{} still holds the files; remove them there to stop tracking them",
                ctx.display(&program_dir)
            ));
        }
        Ok(stats.finish("unlinked"))
    }
}
