//! Sync status marker for shell startup hooks.
//!
//! After every sync attempt a one-word file (`ok`, `skipped` or `failed`) is
//! written to `<cache dir>/sync-status`.  A hook that runs `dotlink -q` in the
//! background can read it later without parsing any console output.
use std::fmt;
use std::path::{Path, PathBuf};

/// File name of the marker inside the cache directory.
pub const STATUS_FILE: &str = "sync-status";

/// Outcome of the last repository sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Clone or pull succeeded.
    Ok,
    /// Sync was not attempted (host unreachable).
    Skipped,
    /// Clone or pull failed.
    Failed,
}

impl SyncStatus {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "ok" => Some(Self::Ok),
            "skipped" => Some(Self::Skipped),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path of the marker file inside `cache_dir`.
#[must_use]
pub fn status_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(STATUS_FILE)
}

/// Write `status` to the marker file, creating `cache_dir` if needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_status(cache_dir: &Path, status: SyncStatus) -> std::io::Result<()> {
    std::fs::create_dir_all(cache_dir)?;
    std::fs::write(status_path(cache_dir), format!("{status}\n"))
}

/// Read the marker file; `None` if it is absent or unrecognised.
#[must_use]
pub fn read_status(cache_dir: &Path) -> Option<SyncStatus> {
    std::fs::read_to_string(status_path(cache_dir))
        .ok()
        .and_then(|s| SyncStatus::parse(&s))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn absent_marker_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_status(dir.path()), None);
    }

    #[test]
    fn write_overwrites_previous_status() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("dotlink");
        write_status(&cache, SyncStatus::Failed).unwrap();
        assert_eq!(read_status(&cache), Some(SyncStatus::Failed));
        write_status(&cache, SyncStatus::Ok).unwrap();
        assert_eq!(read_status(&cache), Some(SyncStatus::Ok));
        assert_eq!(std::fs::read_to_string(status_path(&cache)).unwrap(), "ok\n");
    }

    #[test]
    fn garbage_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(status_path(dir.path()), "maybe").unwrap();
        assert_eq!(read_status(dir.path()), None);
    }
}
