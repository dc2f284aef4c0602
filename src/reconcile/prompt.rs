//! Operator prompts, injected into the reconciler as a capability.
use std::path::Path;

use anyhow::Result;
use dialoguer::{Confirm, Select, theme::ColorfulTheme};

/// Answer to the four-way conflict prompt for a local regular file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictChoice {
    /// Open the diff tool on both copies, then ask again.
    Diff,
    /// Move the local file into the repository, then link.
    KeepLocal,
    /// Discard the local file and link to the repository copy.
    KeepRepository,
    /// Leave the local file alone.
    Ignore,
}

impl ConflictChoice {
    /// All choices in menu order.
    pub const ALL: [Self; 4] = [Self::Diff, Self::KeepLocal, Self::KeepRepository, Self::Ignore];

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Diff => "show diff",
            Self::KeepLocal => "keep local file (move it into the repository)",
            Self::KeepRepository => "keep repository file (discard local)",
            Self::Ignore => "ignore for now",
        }
    }
}

/// Blocking questions put to the operator during a sweep.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter: Send + Sync {
    /// Ask whether the foreign symlink at `source` (pointing at `current`)
    /// may be replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn confirm_replace(&self, source: &Path, current: &Path) -> Result<bool>;

    /// Ask how to resolve a local regular file at `source` against the
    /// repository copy at `target`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn resolve_conflict(&self, source: &Path, target: &Path) -> Result<ConflictChoice>;
}

/// [`Prompter`] that asks on the controlling terminal via `dialoguer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm_replace(&self, source: &Path, current: &Path) -> Result<bool> {
        let answer = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "{} links to {}. Replace it?",
                source.display(),
                current.display()
            ))
            .default(false)
            .interact()?;
        Ok(answer)
    }

    fn resolve_conflict(&self, source: &Path, target: &Path) -> Result<ConflictChoice> {
        let labels: Vec<&str> = ConflictChoice::ALL.iter().map(|c| c.label()).collect();
        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "{} differs from {}",
                source.display(),
                target.display()
            ))
            .items(&labels)
            .default(0)
            .interact()?;
        Ok(ConflictChoice::ALL
            .get(index)
            .copied()
            .unwrap_or(ConflictChoice::Ignore))
    }
}
