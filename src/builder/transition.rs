//! Builder for constructing state transitions.

use crate::core::{DefaultKind, EventKind, Guard, StateMachinable, TransitionEvent};
use crate::machine::error::{BuildError, HookError};
use crate::machine::{ActionHook, Transition};
use std::sync::Arc;

/// Builder for constructing transitions with a fluent API.
///
/// `from` and `to` are required; the event kind defaults to `E::default()`,
/// the guard to always-true, and the action to a no-op.
pub struct TransitionBuilder<M: StateMachinable, E: EventKind = DefaultKind> {
    from: Option<M::Kind>,
    to: Option<M::Kind>,
    kind: Option<E>,
    guard: Option<Guard<M>>,
    action: Option<ActionHook<M, E>>,
}

impl<M: StateMachinable, E: EventKind> TransitionBuilder<M, E> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            kind: None,
            guard: None,
            action: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, kind: M::Kind) -> Self {
        self.from = Some(kind);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, kind: M::Kind) -> Self {
        self.to = Some(kind);
        self
    }

    /// Set the event kind the transition fires on (optional).
    pub fn on(mut self, kind: E) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Add a pre-built guard (optional).
    pub fn guard(mut self, guard: Guard<M>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure (optional).
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Set the action hook (optional).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut M, &TransitionEvent<E>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Transition<M, E>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;
        let kind = self.kind.unwrap_or_default();

        Ok(Transition::from_parts(
            from,
            to,
            kind,
            self.guard,
            self.action,
        ))
    }
}

impl<M: StateMachinable, E: EventKind> Default for TransitionBuilder<M, E> {
    fn default() -> Self {
        Self::new()
    }
}
