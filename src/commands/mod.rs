pub mod add;
pub mod sweep;
pub mod unlink;

use crate::error::DotlinkError;
use crate::logging::Logger;

/// Print the run summary, then hand back the outcome of the run.
///
/// The summary is printed even when a task stopped the run, so the operator
/// sees which steps completed before the failure.
///
/// # Errors
///
/// Returns `outcome` unchanged.
pub fn finish(log: &Logger, outcome: Result<(), DotlinkError>) -> Result<(), DotlinkError> {
    log.print_summary();
    outcome
}
