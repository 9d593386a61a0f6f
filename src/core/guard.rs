//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over the host entity that determine
//! whether a transition is eligible to fire. They encode business rules
//! declaratively, without side effects.

use super::state::StateMachinable;

/// Pure predicate over a host entity that gates a transition.
///
/// Guards are evaluated at dispatch time, against the entity being
/// transitioned. A transition without a guard is always eligible (for its
/// event kind); a guarded transition fires only when the predicate returns
/// true.
///
/// # Example
///
/// ```rust
/// use stratum::core::{Guard, StateMachinable};
/// use stratum::state_kind;
///
/// state_kind! {
///     enum TaskState {
///         Pending,
///         Done,
///     }
/// }
///
/// struct Task {
///     state: TaskState,
///     approved: bool,
/// }
///
/// impl StateMachinable for Task {
///     type Kind = TaskState;
///     fn state(&self) -> TaskState {
///         self.state
///     }
///     fn set_state(&mut self, kind: TaskState) {
///         self.state = kind;
///     }
/// }
///
/// let needs_approval = Guard::new(|task: &Task| task.approved);
///
/// let task = Task { state: TaskState::Pending, approved: false };
/// assert!(!needs_approval.check(&task));
/// ```
pub struct Guard<M: StateMachinable> {
    predicate: Box<dyn Fn(&M) -> bool + Send + Sync>,
}

impl<M: StateMachinable> Guard<M> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic for a fixed entity and
    /// thread-safe (`Send + Sync`); the machine may be shared read-only
    /// across threads.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard against an entity.
    pub fn check(&self, entity: &M) -> bool {
        (self.predicate)(entity)
    }
}
