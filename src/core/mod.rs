//! Core vocabulary of the engine.
//!
//! This module contains the value-level building blocks:
//! - State identity via [`StateKind`] and the host contract [`StateMachinable`]
//! - Events via [`EventKind`] and [`TransitionEvent`]
//! - Guard predicates for transition control
//! - Serializable transition records for host-side bookkeeping
//!
//! Everything here is pure data and predicates; dispatch and validation
//! live in [`crate::machine`].

mod event;
mod guard;
mod record;
mod state;

pub use event::{DefaultKind, EventKind, TransitionEvent};
pub use guard::Guard;
pub use record::{TransitionLog, TransitionRecord};
pub use state::{StateKind, StateMachinable};
