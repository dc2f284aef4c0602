//! Repository-backed dotfile linker.
//!
//! Dotfiles live in a git clone under the home directory, grouped by program
//! (`~/DOT/<program>/<path>`), and each one is symlinked back to
//! `~/<path>`.  A sweep brings the home directory in line with the clone;
//! add mode moves new files into it and unlink mode detaches a program again.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: the user config file and resolved run settings
//! - **[`reconcile`]**: per-file state observation, classification and repair
//! - **[`tasks`]**: named units of work (sync, link, add, unlink)
//! - **[`commands`]**: the three run modes wired from those tasks
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod operations;
pub mod probe;
pub mod reconcile;
pub mod resources;
pub mod status;
pub mod tasks;
pub mod vcs;
