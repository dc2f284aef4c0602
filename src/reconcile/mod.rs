//! Reconciliation core: path resolution, state observation, the decision
//! table, and the effects that carry decisions out.
//!
//! The pipeline per tracked file is
//! [`resolve`](paths::resolve) → [`observe`](state::observe) →
//! [`classify`](classify::classify) → [`apply`](reconciler::apply).
//! Only the last step touches the filesystem or the operator.
pub mod classify;
pub mod paths;
pub mod prompt;
pub mod reconciler;
pub mod state;
pub mod walker;

pub use classify::{Action, PolicyMode, Prompt, classify};
pub use paths::{LinkPaths, TrackedFile};
pub use state::LinkState;
