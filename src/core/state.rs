//! State identity and the host-entity contract.
//!
//! A machine is defined over a closed, finite enumeration of state kinds.
//! Host entities expose their current kind through [`StateMachinable`]; the
//! engine reads and writes entity state only through that trait.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// The closed enumeration of state identities for one machine.
///
/// Each machine is keyed by exactly one `StateKind` type, typically a plain
/// `enum` generated with the [`state_kind!`](crate::state_kind) macro. The
/// engine relies on [`all`](StateKind::all) returning the complete constant
/// list so the construction-time verifier can prove that every kind has a
/// registered node.
///
/// # Required Traits
///
/// - `Copy + Eq + Hash`: kinds are small value keys in the node table
/// - `Debug`: kinds must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: kinds must be serializable so hosts can
///   persist entity state
///
/// # Example
///
/// ```rust
/// use stratum::core::StateKind;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum TaskState {
///     Pending,
///     Running,
///     Done,
/// }
///
/// impl StateKind for TaskState {
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Pending => "Pending",
///             Self::Running => "Running",
///             Self::Done => "Done",
///         }
///     }
///
///     fn all() -> &'static [Self] {
///         &[Self::Pending, Self::Running, Self::Done]
///     }
/// }
///
/// assert_eq!(TaskState::all().len(), 3);
/// assert_eq!(TaskState::Running.name(), "Running");
/// ```
pub trait StateKind:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the kind's name for display/logging.
    fn name(&self) -> &'static str;

    /// The complete list of kinds in this enumeration.
    ///
    /// The verifier checks this list against the registered nodes, so a
    /// variant missing here silently escapes the completeness check. The
    /// [`state_kind!`](crate::state_kind) macro generates the list and keeps
    /// it exhaustive.
    fn all() -> &'static [Self];
}

/// The minimal contract a host entity must expose to be driven by a machine.
///
/// The engine never caches entity state; the single `set_state` call inside
/// `forward` is the only mutation it performs. Anything else the entity
/// carries (payload fields, completion flags read by guards) is opaque to
/// the engine.
///
/// # Example
///
/// ```rust
/// use stratum::core::StateMachinable;
/// use stratum::state_kind;
///
/// state_kind! {
///     enum OrderState {
///         Open,
///         Shipped,
///     }
/// }
///
/// struct Order {
///     state: OrderState,
/// }
///
/// impl StateMachinable for Order {
///     type Kind = OrderState;
///
///     fn state(&self) -> OrderState {
///         self.state
///     }
///
///     fn set_state(&mut self, kind: OrderState) {
///         self.state = kind;
///     }
/// }
/// ```
pub trait StateMachinable {
    /// The state enumeration this entity is driven through.
    type Kind: StateKind;

    /// The entity's current state kind.
    fn state(&self) -> Self::Kind;

    /// Assign a new state kind. Called exactly once per successful `forward`.
    fn set_state(&mut self, kind: Self::Kind);
}
