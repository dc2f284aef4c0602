//! Filesystem query abstraction for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that link-state observation can be
//! unit-tested without touching the real filesystem.  Production code uses
//! [`SystemFileSystemOps`]; tests use `MockFileSystemOps`.

use std::path::{Path, PathBuf};

/// What occupies a path, without following a final symlink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Nothing is there (broken symlinks are *not* missing).
    Missing,
    /// A symbolic link and its raw target.
    Symlink(PathBuf),
    /// A regular file.
    File,
    /// A real directory.
    Directory,
    /// A device, socket, FIFO, or an entry that could not be inspected.
    Other,
}

/// Abstraction over the filesystem queries used by reconciliation.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Classify the entry at `path` using `lstat` semantics.
    fn entry_kind(&self, path: &Path) -> EntryKind;

    /// Resolve every symlink in `path`; `None` if it does not exist.
    fn canonicalize(&self, path: &Path) -> Option<PathBuf>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn entry_kind(&self, path: &Path) -> EntryKind {
        let meta = match std::fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return EntryKind::Missing,
            Err(_) => return EntryKind::Other,
        };
        let file_type = meta.file_type();
        if file_type.is_symlink() {
            return std::fs::read_link(path).map_or(EntryKind::Other, EntryKind::Symlink);
        }
        if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        }
    }

    fn canonicalize(&self, path: &Path) -> Option<PathBuf> {
        dunce::canonicalize(path).ok()
    }
}

/// Mock [`FileSystemOps`] for unit tests.
///
/// Unregistered paths report [`EntryKind::Missing`] and canonicalize to
/// themselves.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    entries: std::collections::HashMap<PathBuf, EntryKind>,
    canonical: std::collections::HashMap<PathBuf, PathBuf>,
}

#[cfg(test)]
impl MockFileSystemOps {
    /// Create an empty mock with nothing configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as a regular file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(path.into(), EntryKind::File);
        self
    }

    /// Mark `path` as a real directory.
    #[must_use]
    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(path.into(), EntryKind::Directory);
        self
    }

    /// Register `path` as a symbolic link pointing to `target`.
    #[must_use]
    pub fn with_symlink(mut self, path: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        self.entries
            .insert(path.into(), EntryKind::Symlink(target.into()));
        self
    }

    /// Mark `path` as some other kind of entry (device, socket, ...).
    #[must_use]
    pub fn with_other(mut self, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(path.into(), EntryKind::Other);
        self
    }

    /// Make `path` canonicalize to `real`, as if a component were a symlink.
    #[must_use]
    pub fn with_canonical(mut self, path: impl Into<PathBuf>, real: impl Into<PathBuf>) -> Self {
        self.canonical.insert(path.into(), real.into());
        self
    }
}

#[cfg(test)]
impl FileSystemOps for MockFileSystemOps {
    fn entry_kind(&self, path: &Path) -> EntryKind {
        self.entries
            .get(path)
            .cloned()
            .unwrap_or(EntryKind::Missing)
    }

    fn canonicalize(&self, path: &Path) -> Option<PathBuf> {
        Some(
            self.canonical
                .get(path)
                .cloned()
                .unwrap_or_else(|| path.to_path_buf()),
        )
    }
}
