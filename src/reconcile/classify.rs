//! The conflict decision table.
//!
//! [`classify`] is a total, pure function over ([`LinkState`], [`PolicyMode`]).
//! Rules are evaluated in order and the first match wins:
//!
//! 1. correct symlink, or a path already inside the repository → skip
//! 2. anything exists and policy is quiet → skip
//! 3. nothing exists → create link
//! 4. neither file nor symlink → report anomaly
//! 5. policy is force → overwrite
//! 6. foreign symlink → ask yes/no
//! 7. regular file → ask diff / keep local / keep repository / ignore
use std::fmt;

use super::state::LinkState;

/// How conflicts between local files and repository content are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyMode {
    /// Ask the operator.
    #[default]
    Interactive,
    /// Never prompt, never replace anything that exists.
    Quiet,
    /// Replace whatever is there without asking.
    Force,
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interactive => write!(f, "interactive"),
            Self::Quiet => write!(f, "quiet"),
            Self::Force => write!(f, "force"),
        }
    }
}

/// Which question to put to the operator before overwriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Replace a foreign symlink? (yes/no)
    ReplaceLink,
    /// Resolve a local regular file against the repository copy.
    ResolveConflict,
}

/// What the reconciler should do with one tracked file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the path alone.
    Skip,
    /// Create the symlink; nothing is in the way.
    CreateLink,
    /// Ask first, then overwrite depending on the answer.
    OverwriteWithPrompt(Prompt),
    /// Remove whatever is there and link unconditionally.
    OverwriteForced,
    /// Log the unexpected entry and leave it alone.
    ReportAnomaly,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::CreateLink => write!(f, "create"),
            Self::OverwriteWithPrompt(Prompt::ReplaceLink) => write!(f, "confirm"),
            Self::OverwriteWithPrompt(Prompt::ResolveConflict) => write!(f, "resolve"),
            Self::OverwriteForced => write!(f, "force"),
            Self::ReportAnomaly => write!(f, "anomaly"),
        }
    }
}

/// Decide the action for a path in `state` under `policy`.
#[must_use]
pub const fn classify(state: &LinkState, policy: PolicyMode) -> Action {
    match (state, policy) {
        (LinkState::CorrectSymlink | LinkState::ViaLinkedParent { .. }, _) => Action::Skip,
        (_, PolicyMode::Quiet) if state.exists() => Action::Skip,
        (LinkState::Absent, _) => Action::CreateLink,
        (LinkState::Other { .. }, _) => Action::ReportAnomaly,
        (_, PolicyMode::Force) => Action::OverwriteForced,
        (LinkState::ForeignSymlink { .. }, _) => Action::OverwriteWithPrompt(Prompt::ReplaceLink),
        (LinkState::RegularFile, _) => Action::OverwriteWithPrompt(Prompt::ResolveConflict),
    }
}
