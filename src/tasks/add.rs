use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::error::{AnomalyError, DotlinkError, SyncError};
use crate::reconcile::paths::{LinkPaths, TrackedFile, normalize_relative, validate_program_name};
use crate::reconcile::state::{LinkState, observe};
use crate::resources::fs::move_file;
use crate::resources::symlink::create_symlink;
use crate::vcs::GitRepository;

use super::{Context, Task, TaskResult, TaskStats};

/// Move files from the home directory into a program and link them back.
///
/// Each file is handled on its own; a rejected or failed file never stops the
/// rest of the batch.  Moved files are staged but never committed.
#[derive(Debug)]
pub struct AddFiles {
    program: String,
    files: Vec<PathBuf>,
}

/// How one file of the batch ended.
enum Added {
    Staged,
    Unstaged,
}

impl AddFiles {
    /// Create the task for `program` and home-relative `files`.
    #[must_use]
    pub fn new(program: impl Into<String>, files: Vec<PathBuf>) -> Self {
        Self {
            program: program.into(),
            files,
        }
    }

    fn check(&self, file: &Path, ctx: &Context) -> Result<LinkPaths, AnomalyError> {
        let relative = normalize_relative(file)?;
        let tracked = TrackedFile::new(self.program.as_str(), relative)?;
        let paths = ctx.settings.resolve(&tracked);

        if let LinkState::ViaLinkedParent { resolved } =
            observe(ctx.fs_ops.as_ref(), &paths, &ctx.repo_root())
        {
            return Err(AnomalyError::InsideRepository {
                path: paths.source,
                resolved,
            });
        }
        let is_file = std::fs::symlink_metadata(&paths.source).is_ok_and(|m| m.is_file());
        if !is_file {
            return Err(AnomalyError::NotRegularFile {
                path: paths.source,
            });
        }
        if std::fs::symlink_metadata(&paths.target).is_ok() {
            return Err(AnomalyError::AlreadyTracked {
                program: self.program.clone(),
                path: paths.target,
            });
        }
        Ok(paths)
    }

    fn add_one(
        &self,
        paths: &LinkPaths,
        repo: &GitRepository<'_>,
        ctx: &Context,
    ) -> anyhow::Result<Added> {
        relocate(paths, create_symlink)?;
        ctx.log.info(&format!(
            "added {} to {}",
            ctx.display(&paths.source),
            self.program
        ));

        match repo.stage(&paths.target) {
            Ok(()) => Ok(Added::Staged),
            Err(e) => {
                ctx.log.warn(&format!(
                    "{} is linked but not staged: {e:#}",
                    ctx.display(&paths.target)
                ));
                Ok(Added::Unstaged)
            }
        }
    }
}

/// Move `paths.source` to `paths.target` and `link` it back, moving the file
/// home again if linking fails.
fn relocate(
    paths: &LinkPaths,
    link: impl FnOnce(&Path, &Path) -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    move_file(&paths.source, &paths.target)?;
    if let Err(e) = link(&paths.target, &paths.source) {
        move_file(&paths.target, &paths.source).with_context(|| {
            format!(
                "linking failed and the file is now only at {}",
                paths.target.display()
            )
        })?;
        return Err(e);
    }
    Ok(())
}

impl Task for AddFiles {
    fn name(&self) -> &str {
        &self.program
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult, DotlinkError> {
        let root = ctx.repo_root();
        let repo = GitRepository::new(ctx.executor.as_ref(), &root);
        if !repo.is_cloned() {
            return Err(SyncError::MissingClone { path: root }.into());
        }

        let program_dir = root.join(&self.program);
        let collision = std::fs::symlink_metadata(&program_dir).is_ok_and(|m| !m.is_dir());
        let rejected = validate_program_name(&self.program).err().or_else(|| {
            collision.then(|| AnomalyError::ProgramCollision {
                program: self.program.clone(),
            })
        });
        if let Some(e) = rejected {
            ctx.log.error(&e.to_string());
            return Ok(TaskResult::Skipped(e.to_string()));
        }

        let mut stats = TaskStats::new();
        let mut staged = 0u32;
        for file in &self.files {
            let paths = match self.check(file, ctx) {
                Ok(paths) => paths,
                Err(e) => {
                    ctx.log.error(&e.to_string());
                    stats.skipped += 1;
                    continue;
                }
            };
            match self.add_one(&paths, &repo, ctx) {
                Ok(Added::Staged) => {
                    stats.changed += 1;
                    staged += 1;
                }
                Ok(Added::Unstaged) => stats.changed += 1,
                Err(e) => {
                    ctx.log
                        .error(&format!("{}: {e:#}", ctx.display(&paths.source)));
                    stats.failed += 1;
                }
            }
        }

        if staged > 0 {
            ctx.log.info(&format!(
                "staged {staged} file(s) in {}; commit them when ready",
                ctx.display(&root)
            ));
        }
        Ok(stats.finish("added"))
    }
}
