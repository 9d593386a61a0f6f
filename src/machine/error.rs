//! Error taxonomy for machine construction and dispatch.
//!
//! Construction errors ([`BuildError`]) are programmer errors: the machine
//! definition is wrong and the only fix is changing it. Dispatch errors
//! ([`DispatchError`]) split into the expected `NoApplicableTransition`
//! condition (check `can_forward` first) and the fatal
//! `AmbiguousTransition`, which marks overlapping guards in the design.

use thiserror::Error;

/// Error type returned by user-supplied entry/exit/action hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while defining or verifying a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(kind) before .build()")]
    MissingInitialState,

    #[error("No final states designated. Call .final_state(kind) at least once")]
    NoFinalStates,

    #[error("State '{kind}' is already registered")]
    DuplicateState { kind: String },

    #[error("Transition '{from}' -> '{to}' on event '{event}' is already registered")]
    DuplicateTransition {
        from: String,
        to: String,
        event: String,
    },

    #[error("Transition references unregistered source state '{from}'")]
    IllegalStateReference { from: String },

    #[error("No state node registered for kind(s): {}", kinds.join(", "))]
    MissingStates { kinds: Vec<String> },

    #[error("State(s) unreachable from the initial state: {}", kinds.join(", "))]
    UnreachableStates { kinds: Vec<String> },

    #[error("Final state '{kind}' has outgoing transitions")]
    FinalStateHasTransitions { kind: String },

    #[error("Non-final state '{kind}' has no outgoing transitions, locally or via an ancestor")]
    DeadEndState { kind: String },

    #[error("Transition source state not specified. Call .from(kind)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(kind)")]
    MissingToState,
}

/// Errors raised while forwarding an entity through a machine.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No transition is eligible for the entity's (state, event) pair.
    /// Expected and recoverable; hosts should probe with `can_forward`
    /// instead of relying on this error for control flow.
    #[error("No applicable transition from state '{state}' on event '{event}'")]
    NoApplicableTransition { state: String, event: String },

    /// More than one transition is eligible. The transition set's guards
    /// overlap; this is a machine-design bug, never tolerated silently.
    #[error(
        "{count} transitions eligible from state '{state}' on event '{event}'; \
         guards must be mutually exclusive"
    )]
    AmbiguousTransition {
        state: String,
        event: String,
        count: usize,
    },

    #[error("Exit hook failed leaving state '{state}'")]
    ExitHookFailed {
        state: String,
        #[source]
        source: HookError,
    },

    #[error("Action failed on transition '{from}' -> '{to}'")]
    ActionFailed {
        from: String,
        to: String,
        #[source]
        source: HookError,
    },

    #[error("Entry hook failed entering state '{state}'")]
    EntryHookFailed {
        state: String,
        #[source]
        source: HookError,
    },
}
