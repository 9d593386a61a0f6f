//! Transition events and their kind discriminators.
//!
//! Transitions fire on events. An event carries a kind (which transitions
//! match against), an optional originator description, and a timestamp.
//! The default event is the kind-less trigger used by machines that never
//! discriminate on events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Discriminator for transition events.
///
/// A machine is generic over one `EventKind` type; each transition declares
/// the kind it fires on. Hosts typically generate the type with the
/// [`event_kind!`](crate::event_kind) macro, whose first variant becomes the
/// default kind.
///
/// # Example
///
/// ```rust
/// use stratum::core::EventKind;
/// use stratum::event_kind;
///
/// event_kind! {
///     enum DocEvent {
///         Touch,
///         Submit,
///         Finish,
///     }
/// }
///
/// assert_eq!(DocEvent::default(), DocEvent::Touch);
/// assert_eq!(DocEvent::Submit.name(), "Submit");
/// assert!(DocEvent::Submit.matches(&DocEvent::Submit));
/// assert!(!DocEvent::Submit.matches(&DocEvent::Finish));
/// ```
pub trait EventKind: Clone + PartialEq + Debug + Default + Send + Sync + 'static {
    /// Get the kind's name for display/logging.
    fn name(&self) -> &str;

    /// Whether an incoming event kind satisfies this declared kind.
    ///
    /// Defaults to equality. Kinds that carry payload fields can override
    /// this to compare by variant only, e.g. via `std::mem::discriminant`.
    fn matches(&self, other: &Self) -> bool {
        self == other
    }
}

/// The kind of the default, untyped event.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct DefaultKind;

impl EventKind for DefaultKind {
    fn name(&self) -> &str {
        "default"
    }
}

/// An immutable tagged event: a kind plus an originating source.
///
/// Events are values; the machine never stores them. `TransitionEvent::default()`
/// is the reusable untyped trigger for machines keyed by [`DefaultKind`]
/// (or any kind type with a `Default` variant).
///
/// # Example
///
/// ```rust
/// use stratum::core::{DefaultKind, TransitionEvent};
///
/// let event: TransitionEvent = TransitionEvent::default();
/// assert_eq!(event.kind(), &DefaultKind);
/// assert!(event.source().is_none());
///
/// let event = TransitionEvent::new(DefaultKind).with_source("nightly batch");
/// assert_eq!(event.source(), Some("nightly batch"));
/// ```
#[derive(Clone, Debug)]
pub struct TransitionEvent<E: EventKind = DefaultKind> {
    kind: E,
    source: Option<String>,
    timestamp: DateTime<Utc>,
}

impl<E: EventKind> TransitionEvent<E> {
    /// Create an event of the given kind, timestamped now.
    pub fn new(kind: E) -> Self {
        Self {
            kind,
            source: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach a description of the event's originator.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The event's kind discriminator.
    pub fn kind(&self) -> &E {
        &self.kind
    }

    /// The event's originator description, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// When the event was created.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl<E: EventKind> Default for TransitionEvent<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}
