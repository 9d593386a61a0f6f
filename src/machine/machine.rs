//! The state machine: node table, transition index, and dispatch.

use crate::core::{
    DefaultKind, EventKind, StateKind, StateMachinable, TransitionEvent, TransitionRecord,
};
use crate::machine::error::DispatchError;
use crate::machine::node::Hook;
use crate::machine::transition::Transition;
use chrono::Utc;
use std::collections::{HashMap, HashSet};

/// A flattened state node inside the machine.
///
/// The parent link is a plain kind reference into the node table, never an
/// owning edge, so composite nesting cannot form reference cycles.
pub(crate) struct Node<M: StateMachinable, E: EventKind> {
    pub(crate) parent: Option<M::Kind>,
    pub(crate) entry: Option<Hook<M, E>>,
    pub(crate) exit: Option<Hook<M, E>>,
}

/// A verified, immutable state machine.
///
/// Built once through [`StateMachineBuilder`](crate::builder::StateMachineBuilder),
/// which runs the consistency verifier; after that the machine holds no
/// per-entity state and can be shared read-only across threads. Each
/// [`forward`](Self::forward) call drives one entity one step through the
/// graph.
///
/// Concurrent `forward` calls on the *same* entity must be serialized by the
/// caller; the engine provides no entity-level locking.
pub struct StateMachine<M: StateMachinable, E: EventKind = DefaultKind> {
    nodes: HashMap<M::Kind, Node<M, E>>,
    outgoing: HashMap<M::Kind, Vec<Transition<M, E>>>,
    initial: M::Kind,
    finals: HashSet<M::Kind>,
}

impl<M: StateMachinable, E: EventKind> StateMachine<M, E> {
    pub(crate) fn from_parts(
        nodes: HashMap<M::Kind, Node<M, E>>,
        outgoing: HashMap<M::Kind, Vec<Transition<M, E>>>,
        initial: M::Kind,
        finals: HashSet<M::Kind>,
    ) -> Self {
        Self {
            nodes,
            outgoing,
            initial,
            finals,
        }
    }

    /// The state entities start in.
    pub fn initial_state(&self) -> M::Kind {
        self.initial
    }

    /// The designated final states.
    pub fn final_states(&self) -> impl Iterator<Item = M::Kind> + '_ {
        self.finals.iter().copied()
    }

    /// Whether the given kind is a designated final state.
    pub fn is_final(&self, kind: M::Kind) -> bool {
        self.finals.contains(&kind)
    }

    /// The composite parent of a state, if it has one.
    pub fn parent_of(&self, kind: M::Kind) -> Option<M::Kind> {
        self.nodes.get(&kind).and_then(|node| node.parent)
    }

    /// Whether exactly one transition would fire for this (entity, event)
    /// pair. Never mutates anything; `false` covers both "no eligible
    /// transition" and the ambiguous case.
    pub fn can_forward(&self, entity: &M, event: &TransitionEvent<E>) -> bool {
        self.resolve(entity, event).is_ok()
    }

    /// `can_forward` with the default event.
    pub fn can_forward_default(&self, entity: &M) -> bool {
        self.can_forward(entity, &TransitionEvent::default())
    }

    /// Drive the entity one step through the graph.
    ///
    /// Resolves the unique eligible transition by scanning the outgoing
    /// list of the entity's current state and then each ancestor composite
    /// (inherited transitions), then runs, in order: the old node's exit
    /// hook, the transition's action, the state assignment, the new node's
    /// entry hook.
    ///
    /// The assignment is the single point of no return: a failing exit hook
    /// or action propagates with the entity's state unchanged. A failing
    /// entry hook propagates after the entity already carries its new state.
    pub fn forward(
        &self,
        entity: &mut M,
        event: &TransitionEvent<E>,
    ) -> Result<TransitionRecord<M::Kind>, DispatchError> {
        let transition = self.resolve(entity, event)?;
        let (from_name, to_name, event_name) = transition.describe();
        let from = entity.state();
        let to = transition.to_kind();

        if let Some(hook) = self.nodes.get(&from).and_then(|node| node.exit.as_ref()) {
            hook(entity, event).map_err(|source| DispatchError::ExitHookFailed {
                state: from_name.clone(),
                source,
            })?;
        }

        transition
            .run_action(entity, event)
            .map_err(|source| DispatchError::ActionFailed {
                from: from_name.clone(),
                to: to_name.clone(),
                source,
            })?;

        entity.set_state(to);

        if let Some(hook) = self.nodes.get(&to).and_then(|node| node.entry.as_ref()) {
            hook(entity, event).map_err(|source| DispatchError::EntryHookFailed {
                state: to_name.clone(),
                source,
            })?;
        }

        tracing::debug!(
            from = %from_name,
            to = %to_name,
            event = %event_name,
            "forwarded entity"
        );

        Ok(TransitionRecord {
            from,
            to,
            event: event_name,
            timestamp: Utc::now(),
        })
    }

    /// `forward` with the default event.
    pub fn forward_default(
        &self,
        entity: &mut M,
    ) -> Result<TransitionRecord<M::Kind>, DispatchError> {
        self.forward(entity, &TransitionEvent::default())
    }

    /// Resolve "the" transition for an (entity, event) pair.
    fn resolve(
        &self,
        entity: &M,
        event: &TransitionEvent<E>,
    ) -> Result<&Transition<M, E>, DispatchError> {
        let candidates = self.candidates(entity, event);
        match candidates.len() {
            1 => Ok(candidates[0]),
            0 => Err(DispatchError::NoApplicableTransition {
                state: entity.state().name().to_string(),
                event: event.kind().name().to_string(),
            }),
            count => Err(DispatchError::AmbiguousTransition {
                state: entity.state().name().to_string(),
                event: event.kind().name().to_string(),
                count,
            }),
        }
    }

    /// Collect eligible transitions from the current state's scope and
    /// every ancestor composite's scope.
    ///
    /// Final states never yield candidates, even when an ancestor carries
    /// transitions: once an entity reaches a final state the machine is
    /// closed for it.
    fn candidates(&self, entity: &M, event: &TransitionEvent<E>) -> Vec<&Transition<M, E>> {
        let mut found = Vec::new();
        if self.finals.contains(&entity.state()) {
            return found;
        }

        let mut scope = Some(entity.state());
        while let Some(kind) = scope {
            if let Some(list) = self.outgoing.get(&kind) {
                found.extend(list.iter().filter(|t| t.matches(entity, event)));
            }
            scope = self.nodes.get(&kind).and_then(|node| node.parent);
        }
        found
    }
}
