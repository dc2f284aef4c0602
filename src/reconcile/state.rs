//! Observed state of a home-directory path at reconciliation time.
use std::path::{Path, PathBuf};

use super::paths::LinkPaths;
use crate::operations::{EntryKind, FileSystemOps};
use crate::resources::symlink::link_points_to;

/// What currently sits at a tracked file's home-directory path.
///
/// Derived from the filesystem on every run; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkState {
    /// Nothing is there.
    Absent,
    /// A symlink that already points at the repository copy.
    CorrectSymlink,
    /// A symlink that points somewhere else.
    ForeignSymlink {
        /// Raw link target.
        current: PathBuf,
    },
    /// A regular file, typically the operator's local copy.
    RegularFile,
    /// The path already lands inside the repository because one of its
    /// parent directories is a symlink into the clone.
    ///
    /// Whatever is there belongs to the repository and must not be removed.
    ViaLinkedParent {
        /// Where the path resolves to.
        resolved: PathBuf,
    },
    /// A directory, device, or anything else.
    Other {
        /// Human-readable kind for reporting.
        kind: &'static str,
    },
}

impl LinkState {
    /// `true` for every state except [`LinkState::Absent`].
    #[must_use]
    pub const fn exists(&self) -> bool {
        !matches!(self, Self::Absent)
    }
}

/// Observe the state of `paths.source` relative to `paths.target`.
///
/// Parent directories of the source are resolved first; a source that
/// resolves into `repo_root` is [`LinkState::ViaLinkedParent`] no matter
/// what sits there.
#[must_use]
pub fn observe(fs: &dyn FileSystemOps, paths: &LinkPaths, repo_root: &Path) -> LinkState {
    if let Some(resolved) = resolved_into(fs, &paths.source, repo_root) {
        return LinkState::ViaLinkedParent { resolved };
    }
    match fs.entry_kind(&paths.source) {
        EntryKind::Missing => LinkState::Absent,
        EntryKind::Symlink(current) => {
            if link_points_to(&paths.source, &current, &paths.target) {
                LinkState::CorrectSymlink
            } else {
                LinkState::ForeignSymlink { current }
            }
        }
        EntryKind::File => LinkState::RegularFile,
        EntryKind::Directory => LinkState::Other { kind: "directory" },
        EntryKind::Other => LinkState::Other {
            kind: "special file",
        },
    }
}

/// `path` with its parent resolved, if that lies under `repo_root`.
fn resolved_into(fs: &dyn FileSystemOps, path: &Path, repo_root: &Path) -> Option<PathBuf> {
    let resolved = fs.canonicalize(path.parent()?)?.join(path.file_name()?);
    let root = fs.canonicalize(repo_root)?;
    resolved.starts_with(&root).then_some(resolved)
}
