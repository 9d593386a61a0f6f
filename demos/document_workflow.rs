//! The classic document workflow: Draft -> InProgress -> Closed, with a
//! guarded Finish transition and a host-side transition log.
//!
//! Run with: cargo run --example document_workflow

use stratum::builder::StateMachineBuilder;
use stratum::core::{StateMachinable, TransitionEvent, TransitionLog};
use stratum::machine::{State, Transition};
use stratum::{event_kind, state_kind};

state_kind! {
    enum DocState {
        Draft,
        InProgress,
        Closed,
    }
}

event_kind! {
    enum DocEvent {
        Touch,
        Submit,
        Finish,
    }
}

struct Document {
    state: DocState,
    complete: bool,
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

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let machine = StateMachineBuilder::<Document, DocEvent>::new()
        .initial(DocState::Draft)
        .final_state(DocState::Closed)
        .state(State::new(DocState::Draft))?
        .state(State::new(DocState::InProgress).on_entry(|_doc: &mut Document, event| {
            println!("  (entry hook) work started, triggered by {:?}", event.kind());
            Ok(())
        }))?
        .state(State::new(DocState::Closed))?
        .add_transition(
            Transition::new(DocState::Draft, DocState::InProgress).on(DocEvent::Submit),
        )?
        .add_transition(
            Transition::new(DocState::InProgress, DocState::Closed)
                .on(DocEvent::Finish)
                .when(|doc: &Document| doc.complete),
        )?
        .build()?;

    let mut doc = Document {
        state: machine.initial_state(),
        complete: false,
    };
    let mut log = TransitionLog::new();

    println!("document starts in {:?}", doc.state);

    let record = machine.forward(
        &mut doc,
        &TransitionEvent::new(DocEvent::Submit).with_source("author"),
    )?;
    println!("submitted: {:?} -> {:?}", record.from, record.to);
    log = log.record(record);

    match machine.forward(&mut doc, &TransitionEvent::new(DocEvent::Finish)) {
        Ok(_) => unreachable!("guard should block an incomplete document"),
        Err(err) => println!("finish rejected while incomplete: {err}"),
    }

    doc.complete = true;
    let record = machine.forward(&mut doc, &TransitionEvent::new(DocEvent::Finish))?;
    println!("finished: {:?} -> {:?}", record.from, record.to);
    log = log.record(record);

    println!(
        "closed for further events: {}",
        !machine.can_forward(&doc, &TransitionEvent::new(DocEvent::Touch))
    );
    println!("path taken: {:?}", log.path());

    Ok(())
}
