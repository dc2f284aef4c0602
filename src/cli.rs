use std::path::PathBuf;

use clap::Parser;

use crate::error::DotlinkError;
use crate::reconcile::classify::PolicyMode;

/// Version string reported by `--version` and in the log header.
pub const VERSION: &str = match option_env!("DOTLINK_VERSION") {
    Some(v) => v,
    None => env!("CARGO_PKG_VERSION"),
};

/// Top-level CLI entry point for the dotfile linker.
///
/// With no flags, every tracked program is reconciled against the home
/// directory.
#[derive(Parser, Debug)]
#[command(
    name = "dotlink",
    about = "Keep dotfiles in a git repository and symlink them into place",
    version = VERSION
)]
pub struct Cli {
    /// Move FILEs (relative to the home directory) into program NAME and link them back
    #[arg(short, long, num_args = 2.., value_names = ["NAME", "FILE"])]
    pub add: Option<Vec<String>>,

    /// Replace the links of program NAME with real copies
    #[arg(short, long, value_name = "NAME")]
    pub unlink: Option<String>,

    /// Replace existing files and foreign links without asking
    #[arg(short, long)]
    pub force: bool,

    /// Only sync the repository when the configured host answers a ping
    #[arg(short, long)]
    pub online: bool,

    /// Never prompt, never replace existing files, print errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output (overrides --quiet output suppression)
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a run does, derived from the flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Reconcile every tracked program.
    Sweep,
    /// Move files into a program and link them back.
    Add {
        /// Target program.
        program: String,
        /// Home-relative files to add.
        files: Vec<PathBuf>,
    },
    /// Detach a program's links.
    Unlink {
        /// Program to detach.
        program: String,
    },
}

impl Mode {
    /// Short name used for the log file.
    #[must_use]
    pub const fn command_name(&self) -> &'static str {
        match self {
            Self::Sweep => "sweep",
            Self::Add { .. } => "add",
            Self::Unlink { .. } => "unlink",
        }
    }
}

impl Cli {
    /// Resolve the run mode.
    ///
    /// # Errors
    ///
    /// Returns [`DotlinkError::FlagConflict`] if both `--add` and `--unlink`
    /// are given.
    pub fn mode(&self) -> Result<Mode, DotlinkError> {
        match (&self.add, &self.unlink) {
            (Some(_), Some(_)) => Err(DotlinkError::FlagConflict),
            (Some(values), None) => {
                let (program, files) = values.split_first().ok_or(DotlinkError::FlagConflict)?;
                Ok(Mode::Add {
                    program: program.clone(),
                    files: files.iter().map(PathBuf::from).collect(),
                })
            }
            (None, Some(program)) => Ok(Mode::Unlink {
                program: program.clone(),
            }),
            (None, None) => Ok(Mode::Sweep),
        }
    }

    /// Conflict policy for the sweep.  Quiet wins over force so an
    /// unattended run never replaces anything.
    #[must_use]
    pub const fn policy(&self) -> PolicyMode {
        if self.quiet {
            PolicyMode::Quiet
        } else if self.force {
            PolicyMode::Force
        } else {
            PolicyMode::Interactive
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_flags_is_a_sweep() {
        let cli = Cli::parse_from(["dotlink"]);
        assert_eq!(cli.mode().unwrap(), Mode::Sweep);
        assert_eq!(cli.policy(), PolicyMode::Interactive);
    }

    #[test]
    fn parse_add_with_files() {
        let cli = Cli::parse_from(["dotlink", "-a", "bash", ".bashrc", ".bash_profile"]);
        assert_eq!(
            cli.mode().unwrap(),
            Mode::Add {
                program: "bash".to_string(),
                files: vec![PathBuf::from(".bashrc"), PathBuf::from(".bash_profile")],
            }
        );
    }

    #[test]
    fn add_requires_a_file() {
        assert!(Cli::try_parse_from(["dotlink", "--add", "bash"]).is_err());
    }

    #[test]
    fn parse_unlink_long() {
        let cli = Cli::parse_from(["dotlink", "--unlink", "vim"]);
        assert_eq!(
            cli.mode().unwrap(),
            Mode::Unlink {
                program: "vim".to_string()
            }
        );
        assert_eq!(cli.mode().unwrap().command_name(), "unlink");
    }

    #[test]
    fn add_and_unlink_conflict() {
        let cli = Cli::parse_from(["dotlink", "-u", "vim", "-a", "bash", ".bashrc"]);
        let err = cli.mode().unwrap_err();
        assert!(matches!(err, DotlinkError::FlagConflict));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn policy_flags() {
        assert_eq!(Cli::parse_from(["dotlink", "-f"]).policy(), PolicyMode::Force);
        assert_eq!(Cli::parse_from(["dotlink", "--quiet"]).policy(), PolicyMode::Quiet);
        assert_eq!(
            Cli::parse_from(["dotlink", "-f", "-q"]).policy(),
            PolicyMode::Quiet
        );
    }

    #[test]
    fn parse_online_and_verbose() {
        let cli = Cli::parse_from(["dotlink", "-o", "-v"]);
        assert!(cli.online);
        assert!(cli.verbose);
    }

    #[test]
    fn help_is_reported_as_display_help() {
        let err = Cli::try_parse_from(["dotlink", "-q", "-h"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
