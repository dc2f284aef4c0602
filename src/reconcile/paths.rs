//! Mapping between a tracked file and its two locations on disk.
use std::path::{Component, Path, PathBuf};

use crate::error::AnomalyError;

/// A file a program tracks, named by its path relative to the home directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TrackedFile {
    program: String,
    relative_path: PathBuf,
}

impl TrackedFile {
    /// Create a tracked file entry.
    ///
    /// # Errors
    ///
    /// Returns [`AnomalyError::AbsolutePath`] if `relative_path` is absolute
    /// or starts at a root.
    pub fn new(
        program: impl Into<String>,
        relative_path: impl Into<PathBuf>,
    ) -> Result<Self, AnomalyError> {
        let relative_path = relative_path.into();
        if relative_path.is_absolute() || relative_path.has_root() {
            return Err(AnomalyError::AbsolutePath {
                path: relative_path,
            });
        }
        Ok(Self {
            program: program.into(),
            relative_path,
        })
    }

    /// Name of the owning program.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Path relative to the home directory (and to the program subtree).
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }
}

/// Check that `program` names exactly one non-hidden directory.
///
/// # Errors
///
/// Returns [`AnomalyError::InvalidProgramName`] for empty or hidden names
/// and names containing separators or `..`.
pub fn validate_program_name(program: &str) -> Result<(), AnomalyError> {
    let mut components = Path::new(program).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if single_normal && !program.starts_with('.') {
        Ok(())
    } else {
        Err(AnomalyError::InvalidProgramName {
            program: program.to_string(),
        })
    }
}

/// Drop `.` components from a home-relative path.
///
/// # Errors
///
/// Returns [`AnomalyError::OutsideHome`] if the path contains `..`.
pub fn normalize_relative(path: &Path) -> Result<PathBuf, AnomalyError> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                return Err(AnomalyError::OutsideHome {
                    path: path.to_path_buf(),
                });
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// The two ends of a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPaths {
    /// Location in the home directory (where the symlink lives).
    pub source: PathBuf,
    /// Location in the clone (what the symlink points at).
    pub target: PathBuf,
}

/// Compute `home/<rel>` and `home/<repo_dir>/<program>/<rel>`.
#[must_use]
pub fn resolve(home: &Path, repo_dir: &Path, tracked: &TrackedFile) -> LinkPaths {
    LinkPaths {
        source: home.join(&tracked.relative_path),
        target: home
            .join(repo_dir)
            .join(&tracked.program)
            .join(&tracked.relative_path),
    }
}
