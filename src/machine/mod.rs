//! The dispatch engine: state nodes, transitions, the machine itself, and
//! its construction-time verifier.
//!
//! A machine is built once, verified, and then shared immutably; see
//! [`crate::builder`] for the construction API.

pub mod error;
mod machine;
mod node;
mod transition;
pub(crate) mod validate;

pub use error::{BuildError, DispatchError, HookError};
pub use machine::StateMachine;
pub use node::{CompositeState, Hook, State, StateDef};
pub use transition::{ActionHook, Transition};

pub(crate) use machine::Node;
