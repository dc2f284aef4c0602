//! Domain-specific error types for the dotfile linker.
//!
//! Internal modules return typed errors (e.g. [`ConfigError`],
//! [`AnomalyError`]) while filesystem primitives use [`anyhow`] with context.
//! Only `main` turns a [`DotlinkError`] into a process exit code.
//!
//! # Error hierarchy
//!
//! ```text
//! DotlinkError
//! ├── Config(ConfigError)   : missing or invalid configuration   (exit 2)
//! ├── FlagConflict          : --add together with --unlink       (exit 3)
//! ├── Sync(SyncError)       : clone / pull failed                (exit 1)
//! ├── Anomaly(AnomalyError) : a per-file anomaly made fatal      (exit 1)
//! ├── Unlink { .. }         : copy failed mid-unlink, run stops  (exit 1)
//! └── Io { .. }             : any other fatal I/O failure         (exit 1)
//! ```
use std::path::PathBuf;

use thiserror::Error;

/// Exit code for a failed repository sync.
pub const EXIT_SYNC: u8 = 1;
/// Exit code for missing or invalid configuration.
pub const EXIT_CONFIG: u8 = 2;
/// Exit code for contradictory or malformed command-line flags.
pub const EXIT_USAGE: u8 = 3;

/// Top-level error type, aggregated at the process boundary.
#[derive(Error, Debug)]
pub enum DotlinkError {
    /// Required configuration is absent or malformed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// `--add` and `--unlink` were requested together.
    #[error("--add and --unlink cannot be used together")]
    FlagConflict,

    /// The backing repository could not be cloned or updated.
    #[error("repository sync failed: {0}")]
    Sync(#[from] SyncError),

    /// A per-file anomaly surfaced as an error by its caller.
    #[error("{0}")]
    Anomaly(#[from] AnomalyError),

    /// Copying repository content back over a link failed during unlink.
    #[error("unlink stopped at {path}: {reason}")]
    Unlink {
        /// Home-directory path that was being detached.
        path: PathBuf,
        /// Full context chain of the underlying failure.
        reason: String,
    },

    /// Some other I/O failure that prevents the run from continuing.
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted.
        context: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

impl DotlinkError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => EXIT_CONFIG,
            Self::FlagConflict => EXIT_USAGE,
            Self::Sync(_) | Self::Anomaly(_) | Self::Unlink { .. } | Self::Io { .. } => {
                EXIT_SYNC
            }
        }
    }

    /// `true` for errors raised before any command runs.
    ///
    /// Commands log their own failures as they happen; only these still need
    /// reporting at the process boundary.
    #[must_use]
    pub const fn before_command(&self) -> bool {
        matches!(self, Self::Config(_) | Self::FlagConflict)
    }
}

/// Errors that arise while loading and validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required value is empty or absent.
    #[error("'{key}' is not set; add it to {hint}")]
    Missing {
        /// Name of the configuration key.
        key: &'static str,
        /// Where the operator can set it.
        hint: String,
    },

    /// The clone directory must be relative to the home directory.
    #[error("'{key}' must be relative to the home directory, got '{value}'")]
    NotRelative {
        /// Name of the configuration key.
        key: &'static str,
        /// The offending value.
        value: String,
    },

    /// Neither `HOME` nor `USERPROFILE` is set.
    #[error("HOME environment variable is not set")]
    HomeNotSet,

    /// The config file contains invalid TOML or unknown keys.
    #[error("invalid config file {file}: {message}")]
    InvalidSyntax {
        /// Path to the config file.
        file: String,
        /// Parser message.
        message: String,
    },

    /// The config file exists but could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors from the repository sync collaborator.
#[derive(Error, Debug)]
pub enum SyncError {
    /// `git clone` failed.
    #[error("cloning {remote} failed: {reason}")]
    Clone {
        /// Remote repository reference.
        remote: String,
        /// Message from the version-control client.
        reason: String,
    },

    /// `git pull` failed.
    #[error("updating {path} failed: {reason}")]
    Pull {
        /// Local clone directory.
        path: PathBuf,
        /// Message from the version-control client.
        reason: String,
    },

    /// No local clone exists and none could be made.
    #[error("no local clone at {path}")]
    MissingClone {
        /// Expected clone directory.
        path: PathBuf,
    },
}

/// Per-file anomalies: reported, then the file is skipped.
#[derive(Error, Debug)]
pub enum AnomalyError {
    /// The home-directory entry is neither a regular file nor a symlink.
    #[error("{path} is a {kind}, not a file or symlink; leaving it alone")]
    UnexpectedEntry {
        /// Home-directory path.
        path: PathBuf,
        /// Human-readable kind (e.g. `"directory"`).
        kind: &'static str,
    },

    /// Files to add must be given relative to the home directory.
    #[error("{path} is absolute; give paths relative to the home directory")]
    AbsolutePath {
        /// The rejected path.
        path: PathBuf,
    },

    /// Only existing regular files can be added.
    #[error("{path} is not an existing regular file")]
    NotRegularFile {
        /// The rejected path.
        path: PathBuf,
    },

    /// The program already tracks a file at this path.
    #[error("{path} is already tracked by '{program}'; remove it from the repository first")]
    AlreadyTracked {
        /// Program that tracks the file.
        program: String,
        /// Repository path of the tracked copy.
        path: PathBuf,
    },

    /// The program name collides with a non-directory entry in the repository.
    #[error("'{program}' clashes with a file in the repository root")]
    ProgramCollision {
        /// The requested program name.
        program: String,
    },

    /// No directory for this program exists in the repository.
    #[error("no program named '{program}' in the repository")]
    UnknownProgram {
        /// The requested program name.
        program: String,
    },

    /// Program names are single, non-hidden directory names.
    #[error("'{program}' is not a valid program name")]
    InvalidProgramName {
        /// The rejected name.
        program: String,
    },

    /// Files to add must stay inside the home directory.
    #[error("{path} leaves the home directory")]
    OutsideHome {
        /// The rejected path.
        path: PathBuf,
    },

    /// Unlink expected a symlink but found something else.
    #[error("{path} is not a symlink; skipping")]
    NotLinked {
        /// Home-directory path.
        path: PathBuf,
    },

    /// The home path resolves into the clone through a linked parent
    /// directory, so whatever is there is repository content.
    #[error("{path} resolves to {resolved} inside the repository; leaving it alone")]
    InsideRepository {
        /// Home-directory path.
        path: PathBuf,
        /// Where the path resolves to.
        resolved: PathBuf,
    },

    /// Unlink found a symlink that points somewhere other than the repository.
    #[error("{path} points to {actual}, not into the repository; skipping")]
    WrongTarget {
        /// Home-directory path.
        path: PathBuf,
        /// Where the link actually points.
        actual: PathBuf,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn exit_codes_follow_the_documented_table() {
        let config: DotlinkError = ConfigError::HomeNotSet.into();
        assert_eq!(config.exit_code(), 2);
        assert_eq!(DotlinkError::FlagConflict.exit_code(), 3);
        let sync: DotlinkError = SyncError::MissingClone {
            path: PathBuf::from("/home/u/DOT"),
        }
        .into();
        assert_eq!(sync.exit_code(), 1);
    }

    #[test]
    fn only_startup_errors_are_left_for_the_boundary() {
        assert!(DotlinkError::FlagConflict.before_command());
        assert!(DotlinkError::from(ConfigError::HomeNotSet).before_command());
        let sync = DotlinkError::from(SyncError::MissingClone {
            path: PathBuf::from("/home/u/DOT"),
        });
        assert!(!sync.before_command());
        let unlink = DotlinkError::Unlink {
            path: PathBuf::from("/home/u/.vimrc"),
            reason: "disk full".to_string(),
        };
        assert!(!unlink.before_command());
    }

    #[test]
    fn config_missing_display_names_key() {
        let e = ConfigError::Missing {
            key: "remote",
            hint: "~/.config/dotlink/config.toml".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "'remote' is not set; add it to ~/.config/dotlink/config.toml"
        );
    }

    #[test]
    fn config_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: "/x/config.toml".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.source().is_some());
        assert!(e.to_string().contains("/x/config.toml"));
    }

    #[test]
    fn anomaly_converts_into_top_level() {
        let e: DotlinkError = AnomalyError::AbsolutePath {
            path: PathBuf::from("/etc/passwd"),
        }
        .into();
        assert!(e.to_string().contains("relative to the home directory"));
        assert_eq!(e.exit_code(), 1);
    }

    #[test]
    fn already_tracked_mentions_remediation() {
        let e = AnomalyError::AlreadyTracked {
            program: "bash".to_string(),
            path: PathBuf::from("/h/DOT/bash/.bashrc"),
        };
        assert!(e.to_string().contains("remove it from the repository first"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<DotlinkError>();
        assert_send_sync::<ConfigError>();
        assert_send_sync::<SyncError>();
        assert_send_sync::<AnomalyError>();
    }

    #[test]
    fn sync_error_converts_to_anyhow() {
        let e = SyncError::Pull {
            path: PathBuf::from("/h/DOT"),
            reason: "conflict".to_string(),
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}
