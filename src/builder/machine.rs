//! Builder for constructing state machines.

use crate::builder::transition::TransitionBuilder;
use crate::core::{DefaultKind, EventKind, StateKind, StateMachinable};
use crate::machine::error::BuildError;
use crate::machine::validate;
use crate::machine::{Node, StateDef, StateMachine, Transition};
use std::collections::{HashMap, HashSet};

/// Builder for constructing state machines with a fluent API.
///
/// States and transitions are registered during a single construction
/// phase; duplicate and dangling references fail at add time, and the
/// global consistency checks (completeness, reachability, final-state
/// closure, escape paths) run once inside [`build`](Self::build).
pub struct StateMachineBuilder<M: StateMachinable, E: EventKind = DefaultKind> {
    initial: Option<M::Kind>,
    finals: HashSet<M::Kind>,
    nodes: HashMap<M::Kind, Node<M, E>>,
    outgoing: HashMap<M::Kind, Vec<Transition<M, E>>>,
}

impl<M: StateMachinable, E: EventKind> StateMachineBuilder<M, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            finals: HashSet::new(),
            nodes: HashMap::new(),
            outgoing: HashMap::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, kind: M::Kind) -> Self {
        self.initial = Some(kind);
        self
    }

    /// Designate a final state (at least one required).
    pub fn final_state(mut self, kind: M::Kind) -> Self {
        self.finals.insert(kind);
        self
    }

    /// Designate several final states at once.
    pub fn final_states(mut self, kinds: impl IntoIterator<Item = M::Kind>) -> Self {
        self.finals.extend(kinds);
        self
    }

    /// Register a state node. A composite is flattened: its inner states
    /// are registered recursively, with parent links pointing back at it.
    ///
    /// Fails with [`BuildError::DuplicateState`] on a machine-wide kind
    /// collision.
    pub fn state(mut self, def: impl Into<StateDef<M, E>>) -> Result<Self, BuildError> {
        self.register(def.into(), None)?;
        Ok(self)
    }

    /// Register a transition on the outgoing list of its source state.
    ///
    /// Fails with [`BuildError::IllegalStateReference`] if the source is
    /// not a registered state (register states first), or
    /// [`BuildError::DuplicateTransition`] on an exact `(from, to, event)`
    /// collision.
    pub fn add_transition(mut self, transition: Transition<M, E>) -> Result<Self, BuildError> {
        let from = transition.from_kind();
        if !self.nodes.contains_key(&from) {
            return Err(BuildError::IllegalStateReference {
                from: from.name().to_string(),
            });
        }

        let list = self.outgoing.entry(from).or_default();
        if list.iter().any(|existing| *existing == transition) {
            let (from, to, event) = transition.describe();
            return Err(BuildError::DuplicateTransition { from, to, event });
        }
        list.push(transition);
        Ok(self)
    }

    /// Register a transition from a [`TransitionBuilder`].
    pub fn transition(self, builder: TransitionBuilder<M, E>) -> Result<Self, BuildError> {
        self.add_transition(builder.build()?)
    }

    /// Build the machine, running the consistency verifier.
    pub fn build(self) -> Result<StateMachine<M, E>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;
        if self.finals.is_empty() {
            return Err(BuildError::NoFinalStates);
        }

        validate::verify::<M, E>(&self.nodes, &self.outgoing, initial, &self.finals)?;

        Ok(StateMachine::from_parts(
            self.nodes,
            self.outgoing,
            initial,
            self.finals,
        ))
    }

    fn register(&mut self, def: StateDef<M, E>, parent: Option<M::Kind>) -> Result<(), BuildError> {
        match def {
            StateDef::Simple(state) => {
                let (kind, entry, exit) = state.into_parts();
                self.insert_node(kind, parent, entry, exit)
            }
            StateDef::Composite(composite) => {
                let (state, inner) = composite.into_parts();
                let (kind, entry, exit) = state.into_parts();
                self.insert_node(kind, parent, entry, exit)?;
                for child in inner {
                    self.register(child, Some(kind))?;
                }
                Ok(())
            }
        }
    }

    fn insert_node(
        &mut self,
        kind: M::Kind,
        parent: Option<M::Kind>,
        entry: Option<crate::machine::Hook<M, E>>,
        exit: Option<crate::machine::Hook<M, E>>,
    ) -> Result<(), BuildError> {
        if self.nodes.contains_key(&kind) {
            return Err(BuildError::DuplicateState {
                kind: kind.name().to_string(),
            });
        }
        self.nodes.insert(
            kind,
            Node {
                parent,
                entry,
                exit,
            },
        );
        Ok(())
    }
}

impl<M: StateMachinable, E: EventKind> Default for StateMachineBuilder<M, E> {
    fn default() -> Self {
        Self::new()
    }
}
