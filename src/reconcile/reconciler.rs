//! Applies classified actions to the filesystem.
//!
//! Removal-then-create sequences are not atomic: if creating the link fails
//! after the old entry was removed, the error is returned and the old entry
//! is gone.
use std::path::Path;

use anyhow::Result;

use super::classify::{Action, Prompt, classify};
use super::paths::LinkPaths;
use super::prompt::ConflictChoice;
use super::state::{LinkState, observe};
use crate::error::AnomalyError;
use crate::resources::ResourceChange;
use crate::resources::fs::move_file;
use crate::resources::symlink::{create_symlink, replace_with_symlink};
use crate::tasks::Context;

/// Observe, classify and apply for one tracked file.
///
/// # Errors
///
/// Returns an error for anomalies and for any failed filesystem operation or
/// prompt; the caller decides whether that stops the run.
pub fn reconcile_file(paths: &LinkPaths, ctx: &Context) -> Result<ResourceChange> {
    let state = observe(ctx.fs_ops.as_ref(), paths, &ctx.repo_root());
    let action = classify(&state, ctx.settings.policy);
    ctx.log.debug(&format!(
        "{}: {state:?} under {} policy -> {action}",
        ctx.display(&paths.source),
        ctx.settings.policy
    ));

    match &state {
        LinkState::CorrectSymlink => Ok(ResourceChange::AlreadyCorrect),
        // A linked parent directory already serves the repository copy.
        LinkState::ViaLinkedParent { resolved } => {
            if ctx.fs_ops.canonicalize(&paths.target).as_ref() == Some(resolved) {
                Ok(ResourceChange::AlreadyCorrect)
            } else {
                Err(AnomalyError::InsideRepository {
                    path: paths.source.clone(),
                    resolved: resolved.clone(),
                }
                .into())
            }
        }
        _ => apply(action, &state, paths, ctx),
    }
}

/// Carry out `action` for a path observed in `state`.
///
/// # Errors
///
/// Returns [`AnomalyError::UnexpectedEntry`] for [`Action::ReportAnomaly`],
/// and an I/O error if removing, moving or linking fails.
pub fn apply(
    action: Action,
    state: &LinkState,
    paths: &LinkPaths,
    ctx: &Context,
) -> Result<ResourceChange> {
    let shown = ctx.display(&paths.source);
    match action {
        Action::Skip => Ok(ResourceChange::Skipped {
            reason: format!("{shown} exists"),
        }),
        Action::CreateLink => {
            create_symlink(&paths.target, &paths.source)?;
            ctx.log.info(&format!(
                "linked {shown} -> {}",
                ctx.display(&paths.target)
            ));
            Ok(ResourceChange::Applied)
        }
        Action::OverwriteForced => {
            replace_with_symlink(&paths.target, &paths.source)?;
            ctx.log.info(&format!(
                "replaced {shown} with link to {}",
                ctx.display(&paths.target)
            ));
            Ok(ResourceChange::Applied)
        }
        Action::ReportAnomaly => {
            let kind = match state {
                LinkState::Other { kind } => *kind,
                _ => "unexpected entry",
            };
            Err(AnomalyError::UnexpectedEntry {
                path: paths.source.clone(),
                kind,
            }
            .into())
        }
        Action::OverwriteWithPrompt(Prompt::ReplaceLink) => {
            let current = match state {
                LinkState::ForeignSymlink { current } => current.as_path(),
                _ => Path::new(""),
            };
            if ctx.prompter.confirm_replace(&paths.source, current)? {
                replace_with_symlink(&paths.target, &paths.source)?;
                ctx.log.info(&format!(
                    "relinked {shown} -> {}",
                    ctx.display(&paths.target)
                ));
                Ok(ResourceChange::Applied)
            } else {
                Ok(ResourceChange::Skipped {
                    reason: format!("kept existing link at {shown}"),
                })
            }
        }
        Action::OverwriteWithPrompt(Prompt::ResolveConflict) => resolve_conflict(paths, ctx),
    }
}

/// Four-way prompt loop for a local regular file.
fn resolve_conflict(paths: &LinkPaths, ctx: &Context) -> Result<ResourceChange> {
    let shown = ctx.display(&paths.source);
    loop {
        match ctx.prompter.resolve_conflict(&paths.source, &paths.target)? {
            ConflictChoice::Diff => run_diff(paths, ctx),
            ConflictChoice::KeepLocal => {
                move_file(&paths.source, &paths.target)?;
                create_symlink(&paths.target, &paths.source)?;
                ctx.log.info(&format!(
                    "moved local {shown} into {} and linked it",
                    ctx.display(&paths.target)
                ));
                return Ok(ResourceChange::Applied);
            }
            ConflictChoice::KeepRepository => {
                replace_with_symlink(&paths.target, &paths.source)?;
                ctx.log.info(&format!(
                    "discarded local {shown}, linked to {}",
                    ctx.display(&paths.target)
                ));
                return Ok(ResourceChange::Applied);
            }
            ConflictChoice::Ignore => {
                return Ok(ResourceChange::Skipped {
                    reason: format!("ignored {shown}"),
                });
            }
        }
    }
}

/// Run the configured diff tool on both copies; problems are logged only.
fn run_diff(paths: &LinkPaths, ctx: &Context) {
    let mut words = ctx.settings.diff_tool.split_whitespace();
    let Some(program) = words.next() else {
        ctx.log.error("no diff tool configured");
        return;
    };
    if !ctx.executor.which(program) {
        ctx.log
            .error(&format!("diff tool '{program}' not found on PATH"));
        return;
    }

    let source = paths.source.to_string_lossy();
    let target = paths.target.to_string_lossy();
    let mut args: Vec<&str> = words.collect();
    args.push(&source);
    args.push(&target);

    match ctx.executor.run_interactive(program, &args) {
        Ok(true) => {}
        Ok(false) => ctx
            .log
            .warn(&format!("diff tool '{program}' exited with an error")),
        Err(e) => ctx.log.error(&format!("{e:#}")),
    }
}
