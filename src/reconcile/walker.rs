//! Enumerates programs and their tracked files, and drives the reconciler.
use std::path::Path;

use anyhow::{Context as _, Result};
use walkdir::WalkDir;

use super::paths::TrackedFile;
use super::reconciler::reconcile_file;
use crate::resources::ResourceChange;
use crate::tasks::{Context, TaskStats};

/// Program directories in the clone root, sorted by name.
///
/// Hidden entries (`.git`, `.github`, ...) and plain files are not programs.
///
/// # Errors
///
/// Returns an error if the clone root cannot be read.
pub fn programs(repo_root: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(repo_root)
        .with_context(|| format!("reading {}", repo_root.display()))?
    {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || !entry.file_type()?.is_dir() {
            continue;
        }
        names.push(name);
    }
    names.sort();
    Ok(names)
}

/// Every regular file under `repo_root/<program>`, in sorted order.
///
/// Directories are traversed but never returned; symlinks inside the clone
/// are not followed.
///
/// # Errors
///
/// Returns an error if the program subtree cannot be traversed.
pub fn tracked_files(repo_root: &Path, program: &str) -> Result<Vec<TrackedFile>> {
    let root = repo_root.join(program);
    let mut files = Vec::new();
    for entry in WalkDir::new(&root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(&root)
            .with_context(|| format!("{} is outside {}", entry.path().display(), root.display()))?;
        files.push(TrackedFile::new(program, relative)?);
    }
    Ok(files)
}

/// Reconcile every tracked file of `program`.
///
/// Per-file errors are logged and counted; they never stop the walk.
///
/// # Errors
///
/// Returns an error only if the program subtree cannot be traversed.
pub fn reconcile_program(program: &str, ctx: &Context) -> Result<TaskStats> {
    let mut stats = TaskStats::new();
    for tracked in tracked_files(&ctx.repo_root(), program)? {
        let paths = ctx.settings.resolve(&tracked);
        match reconcile_file(&paths, ctx) {
            Ok(ResourceChange::Applied) => stats.changed += 1,
            Ok(ResourceChange::AlreadyCorrect) => stats.already_ok += 1,
            Ok(ResourceChange::Skipped { reason }) => {
                ctx.log.debug(&format!("skipped: {reason}"));
                stats.skipped += 1;
            }
            Err(e) => {
                ctx.log.error(&format!("{}: {e:#}", ctx.display(&paths.source)));
                stats.failed += 1;
            }
        }
    }
    Ok(stats)
}
