//! Composite states in action: a review pipeline where cancellation is
//! declared once, on the enclosing composite, and inherited by every
//! nested stage.
//!
//! Run with: cargo run --example nested_review

use stratum::builder::StateMachineBuilder;
use stratum::core::{StateMachinable, TransitionEvent};
use stratum::machine::{CompositeState, State, Transition};
use stratum::{event_kind, state_kind};

state_kind! {
    enum ReviewState {
        UnderReview,
        Screening,
        Assessment,
        PanelDebate,
        Accepted,
        Withdrawn,
    }
}

event_kind! {
    enum ReviewEvent {
        Advance,
        Accept,
        Withdraw,
    }
}

struct Submission {
    state: ReviewState,
    endorsed: bool,
}

impl StateMachinable for Submission {
    type Kind = ReviewState;

    fn state(&self) -> ReviewState {
        self.state
    }

    fn set_state(&mut self, kind: ReviewState) {
        self.state = kind;
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // UnderReview encloses all review stages; Assessment encloses the
    // panel debate. Withdraw is declared once on UnderReview and applies
    // to every stage, however deeply nested.
    let under_review = CompositeState::new(ReviewState::UnderReview)
        .with_inner(State::new(ReviewState::Screening))?
        .with_inner(
            CompositeState::new(ReviewState::Assessment)
                .with_inner(State::new(ReviewState::PanelDebate))?,
        )?;

    let machine = StateMachineBuilder::<Submission, ReviewEvent>::new()
        .initial(ReviewState::Screening)
        .final_states([ReviewState::Accepted, ReviewState::Withdrawn])
        .state(under_review)?
        .state(State::new(ReviewState::Accepted))?
        .state(State::new(ReviewState::Withdrawn))?
        .add_transition(
            Transition::new(ReviewState::Screening, ReviewState::Assessment)
                .on(ReviewEvent::Advance),
        )?
        .add_transition(
            Transition::new(ReviewState::Assessment, ReviewState::PanelDebate)
                .on(ReviewEvent::Advance),
        )?
        .add_transition(
            Transition::new(ReviewState::UnderReview, ReviewState::Accepted)
                .on(ReviewEvent::Accept)
                .when(|s: &Submission| s.endorsed),
        )?
        .add_transition(
            Transition::new(ReviewState::UnderReview, ReviewState::Withdrawn)
                .on(ReviewEvent::Withdraw),
        )?
        .build()?;

    let mut submission = Submission {
        state: machine.initial_state(),
        endorsed: false,
    };

    machine.forward(&mut submission, &TransitionEvent::new(ReviewEvent::Advance))?;
    machine.forward(&mut submission, &TransitionEvent::new(ReviewEvent::Advance))?;
    println!("submission now in {:?}", submission.state);

    // Withdraw was never declared on PanelDebate, yet it fires there,
    // inherited through Assessment and UnderReview.
    let record = machine.forward(
        &mut submission,
        &TransitionEvent::new(ReviewEvent::Withdraw).with_source("author request"),
    )?;
    println!(
        "withdrawn from {:?} via inherited transition -> {:?}",
        record.from, record.to
    );

    Ok(())
}
