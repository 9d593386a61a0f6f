//! State nodes: plain states, composite states, and lifecycle hooks.
//!
//! States are declared as values and handed to the builder, which flattens
//! composites into the machine's node table. The composite owns its inner
//! states only until registration; inside the machine the parent link is a
//! plain kind reference, never an owning edge.

use crate::core::{DefaultKind, EventKind, StateKind, StateMachinable, TransitionEvent};
use crate::machine::error::{BuildError, HookError};
use std::sync::Arc;

/// Side-effecting lifecycle hook invoked on state entry or exit.
///
/// Hooks receive the entity and the triggering event. A failing hook aborts
/// the transition; see [`StateMachine::forward`](crate::machine::StateMachine::forward)
/// for the exact ordering guarantees.
pub type Hook<M, E> =
    Arc<dyn Fn(&mut M, &TransitionEvent<E>) -> Result<(), HookError> + Send + Sync>;

/// A named node in the machine, with optional entry/exit hooks.
///
/// # Example
///
/// ```rust
/// use stratum::core::StateMachinable;
/// use stratum::machine::State;
/// use stratum::state_kind;
///
/// state_kind! {
///     enum LampState {
///         Off,
///         On,
///     }
/// }
///
/// struct Lamp {
///     state: LampState,
///     switched_on: u32,
/// }
///
/// impl StateMachinable for Lamp {
///     type Kind = LampState;
///     fn state(&self) -> LampState {
///         self.state
///     }
///     fn set_state(&mut self, kind: LampState) {
///         self.state = kind;
///     }
/// }
///
/// let on: State<Lamp> = State::new(LampState::On).on_entry(|lamp: &mut Lamp, _event| {
///     lamp.switched_on += 1;
///     Ok(())
/// });
/// assert_eq!(on.kind(), LampState::On);
/// ```
pub struct State<M: StateMachinable, E: EventKind = DefaultKind> {
    kind: M::Kind,
    entry: Option<Hook<M, E>>,
    exit: Option<Hook<M, E>>,
}

impl<M: StateMachinable, E: EventKind> State<M, E> {
    /// Create a state node for the given kind with no-op hooks.
    pub fn new(kind: M::Kind) -> Self {
        Self {
            kind,
            entry: None,
            exit: None,
        }
    }

    /// Attach an entry hook, invoked after the entity's state is assigned.
    pub fn on_entry<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut M, &TransitionEvent<E>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.entry = Some(Arc::new(hook));
        self
    }

    /// Attach an exit hook, invoked before the transition's action runs.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut M, &TransitionEvent<E>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.exit = Some(Arc::new(hook));
        self
    }

    /// The state kind this node wraps.
    pub fn kind(&self) -> M::Kind {
        self.kind
    }

    pub(crate) fn into_parts(self) -> (M::Kind, Option<Hook<M, E>>, Option<Hook<M, E>>) {
        (self.kind, self.entry, self.exit)
    }
}

/// A state that owns a set of inner states.
///
/// Transitions declared with a composite as their source apply to every
/// inner state, recursively. Composites nest to arbitrary depth, but each
/// state kind may appear in the machine exactly once.
///
/// # Example
///
/// ```rust
/// use stratum::core::StateMachinable;
/// use stratum::machine::{CompositeState, State};
/// use stratum::state_kind;
///
/// state_kind! {
///     enum TicketState {
///         Open,
///         Triaged,
///         InProgress,
///         Closed,
///     }
/// }
///
/// struct Ticket {
///     state: TicketState,
/// }
///
/// impl StateMachinable for Ticket {
///     type Kind = TicketState;
///     fn state(&self) -> TicketState {
///         self.state
///     }
///     fn set_state(&mut self, kind: TicketState) {
///         self.state = kind;
///     }
/// }
///
/// let active: CompositeState<Ticket> = CompositeState::new(TicketState::Open)
///     .with_inner(State::new(TicketState::Triaged))
///     .unwrap()
///     .with_inner(State::new(TicketState::InProgress))
///     .unwrap();
/// assert_eq!(active.kind(), TicketState::Open);
/// ```
pub struct CompositeState<M: StateMachinable, E: EventKind = DefaultKind> {
    state: State<M, E>,
    inner: Vec<StateDef<M, E>>,
}

impl<M: StateMachinable, E: EventKind> CompositeState<M, E> {
    /// Create a composite node for the given kind with no inner states.
    pub fn new(kind: M::Kind) -> Self {
        Self {
            state: State::new(kind),
            inner: Vec::new(),
        }
    }

    /// Attach an entry hook to the composite itself.
    pub fn on_entry<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut M, &TransitionEvent<E>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.state = self.state.on_entry(hook);
        self
    }

    /// Attach an exit hook to the composite itself.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut M, &TransitionEvent<E>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.state = self.state.on_exit(hook);
        self
    }

    /// Register an inner state.
    ///
    /// Fails with [`BuildError::DuplicateState`] if the inner state's kind
    /// is already present in this composite. Machine-wide uniqueness is
    /// checked later, when the composite is registered.
    pub fn add_inner(&mut self, inner: impl Into<StateDef<M, E>>) -> Result<(), BuildError> {
        let def = inner.into();
        if self.inner.iter().any(|d| d.kind() == def.kind()) {
            return Err(BuildError::DuplicateState {
                kind: def.kind().name().to_string(),
            });
        }
        self.inner.push(def);
        Ok(())
    }

    /// Fluent variant of [`add_inner`](Self::add_inner).
    pub fn with_inner(mut self, inner: impl Into<StateDef<M, E>>) -> Result<Self, BuildError> {
        self.add_inner(inner)?;
        Ok(self)
    }

    /// The state kind this composite wraps.
    pub fn kind(&self) -> M::Kind {
        self.state.kind()
    }

    pub(crate) fn into_parts(self) -> (State<M, E>, Vec<StateDef<M, E>>) {
        (self.state, self.inner)
    }
}

/// A state definition handed to the builder: plain or composite.
pub enum StateDef<M: StateMachinable, E: EventKind = DefaultKind> {
    Simple(State<M, E>),
    Composite(CompositeState<M, E>),
}

impl<M: StateMachinable, E: EventKind> StateDef<M, E> {
    /// The kind of the node at the root of this definition.
    pub fn kind(&self) -> M::Kind {
        match self {
            StateDef::Simple(state) => state.kind(),
            StateDef::Composite(composite) => composite.kind(),
        }
    }
}

impl<M: StateMachinable, E: EventKind> From<State<M, E>> for StateDef<M, E> {
    fn from(state: State<M, E>) -> Self {
        StateDef::Simple(state)
    }
}

impl<M: StateMachinable, E: EventKind> From<CompositeState<M, E>> for StateDef<M, E> {
    fn from(composite: CompositeState<M, E>) -> Self {
        StateDef::Composite(composite)
    }
}
