//! Fluent construction API for state machines.
//!
//! Machines are assembled with [`StateMachineBuilder`] during a single
//! construction phase and verified once in `build()`; the result is
//! immutable. Macros for declaring the kind enums live here too.

pub mod machine;
pub mod macros;
pub mod transition;

pub use machine::StateMachineBuilder;
pub use transition::TransitionBuilder;

use crate::core::{EventKind, StateMachinable};
use crate::machine::Transition;

/// Create a simple unconditional transition on the default event kind.
///
/// # Example
///
/// ```
/// use stratum::builder::simple_transition;
/// use stratum::core::StateMachinable;
/// use stratum::state_kind;
///
/// state_kind! {
///     enum MyState {
///         Start,
///         End,
///     }
/// }
///
/// struct Entity {
///     state: MyState,
/// }
///
/// impl StateMachinable for Entity {
///     type Kind = MyState;
///     fn state(&self) -> MyState {
///         self.state
///     }
///     fn set_state(&mut self, kind: MyState) {
///         self.state = kind;
///     }
/// }
///
/// let transition = simple_transition::<Entity, _>(MyState::Start, MyState::End);
/// # let _: stratum::machine::Transition<Entity> = transition;
/// ```
pub fn simple_transition<M, E>(from: M::Kind, to: M::Kind) -> Transition<M, E>
where
    M: StateMachinable,
    E: EventKind,
{
    Transition::new(from, to)
}

/// Create a transition with a guard predicate on the default event kind.
pub fn guarded_transition<M, E, F>(from: M::Kind, to: M::Kind, guard: F) -> Transition<M, E>
where
    M: StateMachinable,
    E: EventKind,
    F: Fn(&M) -> bool + Send + Sync + 'static,
{
    Transition::new(from, to).when(guard)
}
