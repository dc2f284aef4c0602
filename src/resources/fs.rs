//! File-system helpers shared by link creation, add and unlink.
use anyhow::{Context as _, Result};
use std::path::Path;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Remove an existing file or symlink at `path`, including broken symlinks.
///
/// Does nothing if `path` does not exist.  Real directories are refused.
///
/// # Errors
///
/// Returns an error if the path is a real directory or cannot be removed.
pub fn remove_existing(path: &Path) -> Result<()> {
    let Ok(meta) = std::fs::symlink_metadata(path) else {
        return Ok(());
    };
    if meta.is_dir() {
        anyhow::bail!("refusing to remove directory: {}", path.display());
    }
    std::fs::remove_file(path).with_context(|| format!("remove existing: {}", path.display()))
}

/// Move the file at `from` to `to`, replacing whatever is at `to`.
///
/// Tries a rename first; when that fails (e.g. across filesystems) the file
/// is copied and the original removed.
///
/// # Errors
///
/// Returns an error if neither the rename nor the copy fallback succeeds.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    ensure_parent_dir(to)?;
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    remove_existing(to)?;
    std::fs::copy(from, to)
        .with_context(|| format!("copy {} to {}", from.display(), to.display()))?;
    std::fs::remove_file(from).with_context(|| format!("remove moved file: {}", from.display()))
}
