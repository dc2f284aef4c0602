//! Filesystem primitives used by the reconciler and the add/unlink tasks.
pub mod fs;
pub mod symlink;

/// Result of applying a change to one path.
///
/// # Examples
///
/// ```
/// use dotlink::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let noop = ResourceChange::AlreadyCorrect;
/// let skipped = ResourceChange::Skipped { reason: "declined".into() };
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, noop);
/// assert_ne!(noop, skipped);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// The path was created or replaced.
    Applied,
    /// The path already had the desired state.
    AlreadyCorrect,
    /// The path was left alone on purpose.
    Skipped {
        /// Why it was left alone.
        reason: String,
    },
}
