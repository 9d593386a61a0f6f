//! Construction-time consistency verification.
//!
//! Runs once, at the end of `build()`. Checks, in order: completeness
//! (every kind has a node), reachability from the initial state, final-state
//! closure, and escape paths for non-final states. All checks operate on
//! the flattened node/edge tables; none of them evaluates guards, which are
//! a dispatch-time concern.

use crate::core::{EventKind, StateKind, StateMachinable};
use crate::machine::error::BuildError;
use crate::machine::machine::Node;
use crate::machine::transition::Transition;
use std::collections::{HashMap, HashSet};

pub(crate) fn verify<M: StateMachinable, E: EventKind>(
    nodes: &HashMap<M::Kind, Node<M, E>>,
    outgoing: &HashMap<M::Kind, Vec<Transition<M, E>>>,
    initial: M::Kind,
    finals: &HashSet<M::Kind>,
) -> Result<(), BuildError> {
    check_completeness::<M, E>(nodes)?;
    check_reachability::<M, E>(nodes, outgoing, initial)?;
    check_final_closure::<M, E>(outgoing, finals)?;
    check_escape_paths::<M, E>(nodes, outgoing, finals)?;
    tracing::debug!(
        states = nodes.len(),
        initial = initial.name(),
        "state machine verified"
    );
    Ok(())
}

/// Every value of the kind enumeration must have a registered node.
fn check_completeness<M: StateMachinable, E: EventKind>(
    nodes: &HashMap<M::Kind, Node<M, E>>,
) -> Result<(), BuildError> {
    let mut missing: Vec<String> = M::Kind::all()
        .iter()
        .filter(|kind| !nodes.contains_key(kind))
        .map(|kind| kind.name().to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        missing.sort();
        Err(BuildError::MissingStates { kinds: missing })
    }
}

/// Walk from the initial state following outgoing-transition edges and
/// child-to-parent edges (being in an inner state implies being in its
/// ancestor chain, which may unlock further transitions). Every node must
/// be visited.
fn check_reachability<M: StateMachinable, E: EventKind>(
    nodes: &HashMap<M::Kind, Node<M, E>>,
    outgoing: &HashMap<M::Kind, Vec<Transition<M, E>>>,
    initial: M::Kind,
) -> Result<(), BuildError> {
    let mut visited: HashSet<M::Kind> = HashSet::new();
    let mut stack = vec![initial];

    while let Some(kind) = stack.pop() {
        if !visited.insert(kind) {
            continue;
        }
        if visited.len() == nodes.len() {
            break;
        }
        if let Some(node) = nodes.get(&kind) {
            if let Some(parent) = node.parent {
                stack.push(parent);
            }
        }
        if let Some(list) = outgoing.get(&kind) {
            for transition in list {
                stack.push(transition.to_kind());
            }
        }
    }

    let mut unreachable: Vec<String> = nodes
        .keys()
        .filter(|kind| !visited.contains(kind))
        .map(|kind| kind.name().to_string())
        .collect();
    if unreachable.is_empty() {
        Ok(())
    } else {
        unreachable.sort();
        Err(BuildError::UnreachableStates {
            kinds: unreachable,
        })
    }
}

/// Final states must have no outgoing transitions.
fn check_final_closure<M: StateMachinable, E: EventKind>(
    outgoing: &HashMap<M::Kind, Vec<Transition<M, E>>>,
    finals: &HashSet<M::Kind>,
) -> Result<(), BuildError> {
    let mut kinds: Vec<M::Kind> = finals.iter().copied().collect();
    kinds.sort_by_key(|kind| kind.name());

    for kind in kinds {
        if outgoing.get(&kind).is_some_and(|list| !list.is_empty()) {
            return Err(BuildError::FinalStateHasTransitions {
                kind: kind.name().to_string(),
            });
        }
    }
    Ok(())
}

/// Every non-final state without a local outgoing transition must have an
/// ancestor composite with at least one.
fn check_escape_paths<M: StateMachinable, E: EventKind>(
    nodes: &HashMap<M::Kind, Node<M, E>>,
    outgoing: &HashMap<M::Kind, Vec<Transition<M, E>>>,
    finals: &HashSet<M::Kind>,
) -> Result<(), BuildError> {
    let mut kinds: Vec<M::Kind> = nodes.keys().copied().collect();
    kinds.sort_by_key(|kind| kind.name());

    for kind in kinds {
        if finals.contains(&kind) {
            continue;
        }
        if outgoing.get(&kind).is_some_and(|list| !list.is_empty()) {
            continue;
        }

        let mut ancestor = nodes.get(&kind).and_then(|node| node.parent);
        let mut escapes = false;
        while let Some(parent) = ancestor {
            if outgoing.get(&parent).is_some_and(|list| !list.is_empty()) {
                escapes = true;
                break;
            }
            ancestor = nodes.get(&parent).and_then(|node| node.parent);
        }

        if !escapes {
            return Err(BuildError::DeadEndState {
                kind: kind.name().to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::StateMachineBuilder;
    use crate::machine::node::{CompositeState, State};
    use crate::state_kind;

    state_kind! {
        enum TestState {
            Start,
            Working,
            Orphan,
            End,
        }
    }

    struct Entity {
        state: TestState,
    }

    impl StateMachinable for Entity {
        type Kind = TestState;

        fn state(&self) -> TestState {
            self.state
        }

        fn set_state(&mut self, kind: TestState) {
            self.state = kind;
        }
    }

    fn base_builder() -> StateMachineBuilder<Entity> {
        StateMachineBuilder::new()
            .initial(TestState::Start)
            .final_state(TestState::End)
    }

    #[test]
    fn missing_node_fails_completeness() {
        // Orphan never registered.
        let result = base_builder()
            .state(State::new(TestState::Start))
            .unwrap()
            .state(State::new(TestState::Working))
            .unwrap()
            .state(State::new(TestState::End))
            .unwrap()
            .add_transition(Transition::new(TestState::Start, TestState::Working))
            .unwrap()
            .add_transition(Transition::new(TestState::Working, TestState::End))
            .unwrap()
            .build();

        assert!(matches!(
            result,
            Err(BuildError::MissingStates { kinds }) if kinds == vec!["Orphan".to_string()]
        ));
    }

    #[test]
    fn unvisited_node_fails_reachability() {
        // Orphan registered but nothing transitions into it.
        let result = base_builder()
            .state(State::new(TestState::Start))
            .unwrap()
            .state(State::new(TestState::Working))
            .unwrap()
            .state(State::new(TestState::Orphan))
            .unwrap()
            .state(State::new(TestState::End))
            .unwrap()
            .add_transition(Transition::new(TestState::Start, TestState::Working))
            .unwrap()
            .add_transition(Transition::new(TestState::Working, TestState::End))
            .unwrap()
            .add_transition(Transition::new(TestState::Orphan, TestState::End))
            .unwrap()
            .build();

        assert!(matches!(
            result,
            Err(BuildError::UnreachableStates { kinds }) if kinds == vec!["Orphan".to_string()]
        ));
    }

    #[test]
    fn final_state_with_outgoing_transition_fails() {
        let result = base_builder()
            .state(State::new(TestState::Start))
            .unwrap()
            .state(State::new(TestState::Working))
            .unwrap()
            .state(State::new(TestState::Orphan))
            .unwrap()
            .state(State::new(TestState::End))
            .unwrap()
            .add_transition(Transition::new(TestState::Start, TestState::Working))
            .unwrap()
            .add_transition(Transition::new(TestState::Working, TestState::End))
            .unwrap()
            .add_transition(Transition::new(TestState::End, TestState::Orphan))
            .unwrap()
            .build();

        assert!(matches!(
            result,
            Err(BuildError::FinalStateHasTransitions { kind }) if kind == "End"
        ));
    }

    #[test]
    fn non_final_state_without_escape_fails() {
        // Working is reachable but has no way out and no ancestor.
        let result = base_builder()
            .state(State::new(TestState::Start))
            .unwrap()
            .state(State::new(TestState::Working))
            .unwrap()
            .state(State::new(TestState::Orphan))
            .unwrap()
            .state(State::new(TestState::End))
            .unwrap()
            .add_transition(Transition::new(TestState::Start, TestState::Working))
            .unwrap()
            .add_transition(Transition::new(TestState::Orphan, TestState::End))
            .unwrap()
            .build();

        // Orphan is also unreachable, but reachability is checked first.
        assert!(matches!(result, Err(BuildError::UnreachableStates { .. })));
    }

    #[test]
    fn dead_end_is_reported_when_everything_is_reachable() {
        let result = base_builder()
            .state(State::new(TestState::Start))
            .unwrap()
            .state(State::new(TestState::Working))
            .unwrap()
            .state(State::new(TestState::Orphan))
            .unwrap()
            .state(State::new(TestState::End))
            .unwrap()
            .add_transition(Transition::new(TestState::Start, TestState::Working))
            .unwrap()
            .add_transition(Transition::new(TestState::Working, TestState::Orphan))
            .unwrap()
            .add_transition(Transition::new(TestState::Working, TestState::End))
            .unwrap()
            .build();

        assert!(matches!(
            result,
            Err(BuildError::DeadEndState { kind }) if kind == "Orphan"
        ));
    }

    #[test]
    fn ancestor_transition_counts_as_escape_path() {
        // Orphan has no local transitions; its composite parent does.
        let composite = CompositeState::new(TestState::Working)
            .with_inner(State::new(TestState::Orphan))
            .unwrap();

        let result = base_builder()
            .state(State::new(TestState::Start))
            .unwrap()
            .state(composite)
            .unwrap()
            .state(State::new(TestState::End))
            .unwrap()
            .add_transition(Transition::new(TestState::Start, TestState::Orphan))
            .unwrap()
            .add_transition(Transition::new(TestState::Working, TestState::End))
            .unwrap()
            .build();

        assert!(result.is_ok());
    }

    #[test]
    fn inner_state_is_reachable_through_its_parent_walk() {
        // Nothing transitions into Working directly, but its child Orphan is
        // entered and the walk climbs child-to-parent edges.
        let composite = CompositeState::new(TestState::Working)
            .with_inner(State::new(TestState::Orphan))
            .unwrap();

        let machine = base_builder()
            .state(State::new(TestState::Start))
            .unwrap()
            .state(composite)
            .unwrap()
            .state(State::new(TestState::End))
            .unwrap()
            .add_transition(Transition::new(TestState::Start, TestState::Orphan))
            .unwrap()
            .add_transition(Transition::new(TestState::Orphan, TestState::End))
            .unwrap()
            .add_transition(Transition::new(TestState::Working, TestState::End))
            .unwrap()
            .build();

        assert!(machine.is_ok());
    }

    #[test]
    fn reachability_names_every_unreachable_state() {
        let result = base_builder()
            .state(State::new(TestState::Start))
            .unwrap()
            .state(State::new(TestState::Working))
            .unwrap()
            .state(State::new(TestState::Orphan))
            .unwrap()
            .state(State::new(TestState::End))
            .unwrap()
            .add_transition(Transition::new(TestState::Start, TestState::End))
            .unwrap()
            .add_transition(Transition::new(TestState::Working, TestState::End))
            .unwrap()
            .add_transition(Transition::new(TestState::Orphan, TestState::End))
            .unwrap()
            .build();

        assert!(matches!(
            result,
            Err(BuildError::UnreachableStates { kinds })
                if kinds == vec!["Orphan".to_string(), "Working".to_string()]
        ));
    }
}
