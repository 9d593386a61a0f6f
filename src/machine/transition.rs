//! Directed transition edges with guards and actions.

use crate::core::{DefaultKind, EventKind, Guard, StateKind, StateMachinable, TransitionEvent};
use crate::machine::error::HookError;
use std::sync::Arc;

/// Side-effecting hook run immediately before the entity's state is assigned.
pub type ActionHook<M, E> =
    Arc<dyn Fn(&mut M, &TransitionEvent<E>) -> Result<(), HookError> + Send + Sync>;

/// A directed edge `(from, to, event kind)` with a guard and an action.
///
/// Identity is the full triple: the machine rejects a second transition with
/// the same `(from, to, kind)` at add time. The guard defaults to
/// always-true and the action to a no-op.
///
/// # Example
///
/// ```rust
/// use stratum::core::StateMachinable;
/// use stratum::machine::Transition;
/// use stratum::{event_kind, state_kind};
///
/// state_kind! {
///     enum DocState {
///         Draft,
///         Review,
///     }
/// }
///
/// event_kind! {
///     enum DocEvent {
///         Touch,
///         Submit,
///     }
/// }
///
/// struct Doc {
///     state: DocState,
///     ready: bool,
/// }
///
/// impl StateMachinable for Doc {
///     type Kind = DocState;
///     fn state(&self) -> DocState {
///         self.state
///     }
///     fn set_state(&mut self, kind: DocState) {
///         self.state = kind;
///     }
/// }
///
/// let submit: Transition<Doc, DocEvent> = Transition::new(DocState::Draft, DocState::Review)
///     .on(DocEvent::Submit)
///     .when(|doc: &Doc| doc.ready);
/// assert_eq!(submit.from_kind(), DocState::Draft);
/// ```
pub struct Transition<M: StateMachinable, E: EventKind = DefaultKind> {
    from: M::Kind,
    to: M::Kind,
    kind: E,
    guard: Option<Guard<M>>,
    action: Option<ActionHook<M, E>>,
}

impl<M: StateMachinable, E: EventKind> Transition<M, E> {
    /// Create a transition firing on the default event kind.
    pub fn new(from: M::Kind, to: M::Kind) -> Self {
        Self {
            from,
            to,
            kind: E::default(),
            guard: None,
            action: None,
        }
    }

    /// Set the event kind this transition fires on.
    pub fn on(mut self, kind: E) -> Self {
        self.kind = kind;
        self
    }

    /// Gate the transition with a predicate over the entity.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Gate the transition with a pre-built guard.
    pub fn with_guard(mut self, guard: Guard<M>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Attach an action hook.
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&mut M, &TransitionEvent<E>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// The source state kind.
    pub fn from_kind(&self) -> M::Kind {
        self.from
    }

    /// The target state kind.
    pub fn to_kind(&self) -> M::Kind {
        self.to
    }

    /// The event kind this transition fires on.
    pub fn event_kind(&self) -> &E {
        &self.kind
    }

    /// Whether this transition is eligible: the event's kind matches the
    /// declared kind and the guard (if any) passes for the entity.
    pub fn matches(&self, entity: &M, event: &TransitionEvent<E>) -> bool {
        self.kind.matches(event.kind()) && self.guard.as_ref().is_none_or(|g| g.check(entity))
    }

    pub(crate) fn run_action(
        &self,
        entity: &mut M,
        event: &TransitionEvent<E>,
    ) -> Result<(), HookError> {
        match &self.action {
            Some(action) => action(entity, event),
            None => Ok(()),
        }
    }

    pub(crate) fn from_parts(
        from: M::Kind,
        to: M::Kind,
        kind: E,
        guard: Option<Guard<M>>,
        action: Option<ActionHook<M, E>>,
    ) -> Self {
        Self {
            from,
            to,
            kind,
            guard,
            action,
        }
    }

    pub(crate) fn describe(&self) -> (String, String, String) {
        (
            self.from.name().to_string(),
            self.to.name().to_string(),
            self.kind.name().to_string(),
        )
    }
}

impl<M: StateMachinable, E: EventKind> std::fmt::Debug for Transition<M, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from.name())
            .field("to", &self.to.name())
            .field("kind", &self.kind.name())
            .finish_non_exhaustive()
    }
}

impl<M: StateMachinable, E: EventKind> PartialEq for Transition<M, E> {
    /// Structural identity: the `(from, to, event kind)` triple.
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.kind == other.kind
    }
}
