//! Stratum: a hierarchical state machine engine
//!
//! Stratum drives host entities through a UML-style finite state machine
//! with composite (nested) states, transitions inherited from ancestor
//! states, guard conditions, and entry/exit hooks. A machine is built once,
//! verified for global consistency (every state reachable, every non-final
//! state escapable, final states closed), and then shared immutably across
//! any number of independent entities.
//!
//! # Core Concepts
//!
//! - **StateKind**: the closed enumeration of state identities
//! - **StateMachinable**: the minimal contract a host entity exposes
//!   (get/set current state)
//! - **CompositeState**: a state owning inner states; its transitions apply
//!   to every descendant
//! - **Guards**: pure predicates over the entity that gate transitions
//! - **forward/can_forward**: deterministic dispatch, resolving at most one
//!   eligible transition per (state, event, entity)
//!
//! # Example
//!
//! ```rust
//! use stratum::builder::StateMachineBuilder;
//! use stratum::core::{StateMachinable, TransitionEvent};
//! use stratum::machine::{State, Transition};
//! use stratum::{event_kind, state_kind};
//!
//! state_kind! {
//!     enum DocState {
//!         Draft,
//!         InProgress,
//!         Closed,
//!     }
//! }
//!
//! event_kind! {
//!     enum DocEvent {
//!         Touch,
//!         Submit,
//!         Finish,
//!     }
//! }
//!
//! struct Document {
//!     state: DocState,
//!     complete: bool,
//! }
//!
//! impl StateMachinable for Document {
//!     type Kind = DocState;
//!
//!     fn state(&self) -> DocState {
//!         self.state
//!     }
//!
//!     fn set_state(&mut self, kind: DocState) {
//!         self.state = kind;
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let machine = StateMachineBuilder::<Document, DocEvent>::new()
//!     .initial(DocState::Draft)
//!     .final_state(DocState::Closed)
//!     .state(State::new(DocState::Draft))?
//!     .state(State::new(DocState::InProgress))?
//!     .state(State::new(DocState::Closed))?
//!     .add_transition(Transition::new(DocState::Draft, DocState::InProgress).on(DocEvent::Submit))?
//!     .add_transition(
//!         Transition::new(DocState::InProgress, DocState::Closed)
//!             .on(DocEvent::Finish)
//!             .when(|doc: &Document| doc.complete),
//!     )?
//!     .build()?;
//!
//! let mut doc = Document { state: DocState::Draft, complete: false };
//! machine.forward(&mut doc, &TransitionEvent::new(DocEvent::Submit))?;
//! assert_eq!(doc.state, DocState::InProgress);
//!
//! // Guard not satisfied yet: no applicable transition.
//! assert!(!machine.can_forward(&doc, &TransitionEvent::new(DocEvent::Finish)));
//!
//! doc.complete = true;
//! machine.forward(&mut doc, &TransitionEvent::new(DocEvent::Finish))?;
//! assert_eq!(doc.state, DocState::Closed);
//!
//! // Final state: closed for every event.
//! assert!(!machine.can_forward(&doc, &TransitionEvent::new(DocEvent::Touch)));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{StateMachineBuilder, TransitionBuilder};
pub use crate::core::{
    DefaultKind, EventKind, Guard, StateKind, StateMachinable, TransitionEvent, TransitionLog,
    TransitionRecord,
};
pub use machine::{
    BuildError, CompositeState, DispatchError, HookError, State, StateDef, StateMachine,
    Transition,
};
