//! Network reachability probe used to gate repository sync.
use crate::exec::Executor;

#[cfg(not(windows))]
const PING_ARGS: [&str; 4] = ["-c", "1", "-W", "1"];
#[cfg(windows)]
const PING_ARGS: [&str; 4] = ["-n", "1", "-w", "1000"];

/// Send one ping to `host` with a one second timeout.
///
/// A ping that cannot be spawned or exits non-zero counts as unreachable.
#[must_use]
pub fn is_reachable(executor: &dyn Executor, host: &str) -> bool {
    let mut args = PING_ARGS.to_vec();
    args.push(host);
    executor
        .run_unchecked("ping", &args)
        .is_ok_and(|r| r.success)
}
