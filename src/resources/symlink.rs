//! Symlink creation, comparison and materialization.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use super::fs::{ensure_parent_dir, remove_existing};

/// Create a symlink at `link` pointing to `target`, creating parents first.
///
/// # Errors
///
/// Returns an error if the parent cannot be created or the link cannot be
/// made (e.g. something already exists at `link`).
pub fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    ensure_parent_dir(link)?;

    #[cfg(unix)]
    std::os::unix::fs::symlink(target, link).with_context(|| {
        format!(
            "creating symlink {} -> {}",
            link.display(),
            target.display()
        )
    })?;

    #[cfg(windows)]
    std::os::windows::fs::symlink_file(target, link).with_context(|| {
        format!(
            "creating symlink {} -> {} (enable Developer Mode or run as Administrator)",
            link.display(),
            target.display()
        )
    })?;

    Ok(())
}

/// Remove whatever is at `link` and point it at `target`.
///
/// Not atomic: if link creation fails after the removal the old entry is
/// gone and the error is returned.
///
/// # Errors
///
/// Returns an error if the removal or the link creation fails.
pub fn replace_with_symlink(target: &Path, link: &Path) -> Result<()> {
    remove_existing(link)?;
    create_symlink(target, link)
}

/// `true` if the raw link target `current` (read from `link`) resolves to
/// `expected`.  Relative targets are interpreted against `link`'s parent.
#[must_use]
pub fn link_points_to(link: &Path, current: &Path, expected: &Path) -> bool {
    let resolved = if current.is_relative() {
        link.parent()
            .map_or_else(|| current.to_path_buf(), |parent| parent.join(current))
    } else {
        current.to_path_buf()
    };
    paths_equal(&resolved, expected)
}

/// Compare two paths lexically, ignoring `.` components, resolving `..`,
/// and stripping the Windows `\\?\` prefix.
#[must_use]
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    normalize(a) == normalize(b)
}

fn normalize(path: &Path) -> PathBuf {
    use std::path::Component;

    let simplified = dunce::simplified(path);
    let mut out = PathBuf::new();
    for component in simplified.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Replace the symlink at `link` with a real copy of `source`.
///
/// The copy is staged to a sibling temp path first so the window where
/// `link` is absent is as small as possible; the rename onto `link` then
/// replaces the entry in one step.
///
/// # Errors
///
/// Returns an error if the copy or the rename fails; the temp file is
/// cleaned up and the symlink is left in place in that case.
pub fn materialize(source: &Path, link: &Path) -> Result<()> {
    let tmp = staging_path(link);
    std::fs::copy(source, &tmp)
        .with_context(|| format!("copy {} to {}", source.display(), tmp.display()))?;

    if let Err(e) = std::fs::rename(&tmp, link) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("rename {} to {}", tmp.display(), link.display()));
    }
    Ok(())
}

fn staging_path(link: &Path) -> PathBuf {
    let name = link.file_name().map_or_else(
        || "dotlink_tmp".to_string(),
        |n| format!(".{}.dotlink_tmp", n.to_string_lossy()),
    );
    link.with_file_name(name)
}
