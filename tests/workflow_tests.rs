//! End-to-end workflow scenarios: the flat document machine and a
//! hierarchical escalation machine exercising composite inheritance.

use stratum::builder::StateMachineBuilder;
use stratum::core::{StateMachinable, TransitionEvent, TransitionLog};
use stratum::machine::{CompositeState, DispatchError, State, StateMachine, Transition};
use stratum::{event_kind, state_kind};

mod document {
    use super::*;

    state_kind! {
        pub enum DocState {
            Draft,
            InProgress,
            Closed,
        }
    }

    event_kind! {
        pub enum DocEvent {
            Touch,
            Submit,
            Finish,
        }
    }

    pub struct Document {
        pub state: DocState,
        pub complete: bool,
    }

    impl StateMachinable for Document {
        type Kind = DocState;

        fn state(&self) -> DocState {
            self.state
        }

        fn set_state(&mut self, kind: DocState) {
            self.state = kind;
        }
    }

    pub fn machine() -> StateMachine<Document, DocEvent> {
        StateMachineBuilder::new()
            .initial(DocState::Draft)
            .final_state(DocState::Closed)
            .state(State::new(DocState::Draft))
            .unwrap()
            .state(State::new(DocState::InProgress))
            .unwrap()
            .state(State::new(DocState::Closed))
            .unwrap()
            .add_transition(
                Transition::new(DocState::Draft, DocState::InProgress).on(DocEvent::Submit),
            )
            .unwrap()
            .add_transition(
                Transition::new(DocState::InProgress, DocState::Closed)
                    .on(DocEvent::Finish)
                    .when(|doc: &Document| doc.complete),
            )
            .unwrap()
            .build()
            .unwrap()
    }
}

#[test]
fn document_workflow_runs_to_completion() {
    use document::*;

    let machine = machine();
    let mut doc = Document {
        state: machine.initial_state(),
        complete: false,
    };
    let mut log = TransitionLog::new();

    let record = machine
        .forward(&mut doc, &TransitionEvent::new(DocEvent::Submit))
        .unwrap();
    log = log.record(record);
    assert_eq!(doc.state, DocState::InProgress);

    // Incomplete: the Finish guard blocks.
    let blocked = machine.forward(&mut doc, &TransitionEvent::new(DocEvent::Finish));
    assert!(matches!(
        blocked,
        Err(DispatchError::NoApplicableTransition { .. })
    ));
    assert_eq!(doc.state, DocState::InProgress);

    doc.complete = true;
    let record = machine
        .forward(&mut doc, &TransitionEvent::new(DocEvent::Finish))
        .unwrap();
    log = log.record(record);
    assert_eq!(doc.state, DocState::Closed);

    // Closed is final: no event moves the document again.
    assert!(!machine.can_forward(&doc, &TransitionEvent::new(DocEvent::Touch)));
    assert!(!machine.can_forward(&doc, &TransitionEvent::new(DocEvent::Submit)));
    assert!(!machine.can_forward(&doc, &TransitionEvent::new(DocEvent::Finish)));

    assert_eq!(
        log.path(),
        vec![DocState::Draft, DocState::InProgress, DocState::Closed]
    );
}

mod escalation {
    use super::*;

    state_kind! {
        pub enum CaseState {
            Open,
            FirstLine,
            SecondLine,
            Specialist,
            Resolved,
            Cancelled,
        }
    }

    event_kind! {
        pub enum CaseEvent {
            Touch,
            Escalate,
            Resolve,
            Cancel,
        }
    }

    pub struct Case {
        pub state: CaseState,
        pub cause_known: bool,
        pub audit: Vec<String>,
    }

    impl StateMachinable for Case {
        type Kind = CaseState;

        fn state(&self) -> CaseState {
            self.state
        }

        fn set_state(&mut self, kind: CaseState) {
            self.state = kind;
        }
    }

    /// `Open` is a composite holding the support tiers; `Cancel` and the
    /// guarded `Resolve` are declared once, on the composite, and inherited
    /// by every tier.
    pub fn machine() -> StateMachine<Case, CaseEvent> {
        let open = CompositeState::new(CaseState::Open)
            .on_exit(|case: &mut Case, _| {
                case.audit.push("left support".to_string());
                Ok(())
            })
            .with_inner(State::new(CaseState::FirstLine))
            .unwrap()
            .with_inner(
                CompositeState::new(CaseState::SecondLine)
                    .with_inner(State::new(CaseState::Specialist))
                    .unwrap(),
            )
            .unwrap();

        StateMachineBuilder::new()
            .initial(CaseState::FirstLine)
            .final_states([CaseState::Resolved, CaseState::Cancelled])
            .state(open)
            .unwrap()
            .state(State::new(CaseState::Resolved).on_entry(|case: &mut Case, _| {
                case.audit.push("resolved".to_string());
                Ok(())
            }))
            .unwrap()
            .state(State::new(CaseState::Cancelled))
            .unwrap()
            .add_transition(
                Transition::new(CaseState::FirstLine, CaseState::SecondLine)
                    .on(CaseEvent::Escalate),
            )
            .unwrap()
            .add_transition(
                Transition::new(CaseState::SecondLine, CaseState::Specialist)
                    .on(CaseEvent::Escalate),
            )
            .unwrap()
            .add_transition(
                Transition::new(CaseState::Open, CaseState::Resolved)
                    .on(CaseEvent::Resolve)
                    .when(|case: &Case| case.cause_known),
            )
            .unwrap()
            .add_transition(
                Transition::new(CaseState::Open, CaseState::Cancelled).on(CaseEvent::Cancel),
            )
            .unwrap()
            .build()
            .unwrap()
    }

    pub fn case() -> Case {
        Case {
            state: CaseState::FirstLine,
            cause_known: false,
            audit: Vec::new(),
        }
    }
}

#[test]
fn inherited_transition_fires_from_every_tier() {
    use escalation::*;

    let machine = machine();

    // First tier inherits Cancel from the Open composite.
    let mut case = case();
    machine
        .forward(&mut case, &TransitionEvent::new(CaseEvent::Cancel))
        .unwrap();
    assert_eq!(case.state, CaseState::Cancelled);

    // The deepest tier inherits it through two composite levels.
    let mut case = escalation::case();
    machine
        .forward(&mut case, &TransitionEvent::new(CaseEvent::Escalate))
        .unwrap();
    machine
        .forward(&mut case, &TransitionEvent::new(CaseEvent::Escalate))
        .unwrap();
    assert_eq!(case.state, CaseState::Specialist);

    machine
        .forward(&mut case, &TransitionEvent::new(CaseEvent::Cancel))
        .unwrap();
    assert_eq!(case.state, CaseState::Cancelled);
}

#[test]
fn inherited_guard_semantics_match_local_ones() {
    use escalation::*;

    let machine = machine();
    let mut case = case();

    let blocked = machine.forward(&mut case, &TransitionEvent::new(CaseEvent::Resolve));
    assert!(matches!(
        blocked,
        Err(DispatchError::NoApplicableTransition { .. })
    ));

    case.cause_known = true;
    machine
        .forward(&mut case, &TransitionEvent::new(CaseEvent::Resolve))
        .unwrap();
    assert_eq!(case.state, CaseState::Resolved);
}

#[test]
fn only_the_current_nodes_hooks_run_on_inherited_edges() {
    use escalation::*;

    let machine = machine();
    let mut case = case();
    case.cause_known = true;

    machine
        .forward(&mut case, &TransitionEvent::new(CaseEvent::Resolve))
        .unwrap();

    // The entity sat in FirstLine, so FirstLine's (absent) exit hook and
    // Resolved's entry hook ran; the audit trail shows the entry hook.
    assert_eq!(case.audit, vec!["resolved"]);
}

#[test]
fn unknown_events_do_not_move_the_entity() {
    use escalation::*;

    let machine = machine();
    let mut case = case();

    let result = machine.forward(&mut case, &TransitionEvent::new(CaseEvent::Touch));
    assert!(matches!(
        result,
        Err(DispatchError::NoApplicableTransition { .. })
    ));
    assert_eq!(case.state, CaseState::FirstLine);
    assert!(case.audit.is_empty());
}
