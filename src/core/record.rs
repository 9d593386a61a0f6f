//! Transition records for host-side bookkeeping.
//!
//! Each successful `forward` hands back a serializable [`TransitionRecord`].
//! Hosts that want an audit trail accumulate them in a [`TransitionLog`];
//! the machine itself stays stateless with respect to entities and never
//! stores records.

use super::state::StateKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single completed transition.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<K: StateKind> {
    /// The state the entity left
    pub from: K,
    /// The state the entity entered
    pub to: K,
    /// Name of the event kind that fired the transition
    pub event: String,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered, immutable log of transition records.
///
/// `record` returns a new log rather than mutating in place, so a log value
/// can be snapshotted freely. Persisting the log (or not) is entirely the
/// host's concern.
///
/// # Example
///
/// ```rust
/// use stratum::core::{TransitionLog, TransitionRecord};
/// use stratum::state_kind;
/// use chrono::Utc;
///
/// state_kind! {
///     enum Phase {
///         One,
///         Two,
///     }
/// }
///
/// let log = TransitionLog::new();
/// let log = log.record(TransitionRecord {
///     from: Phase::One,
///     to: Phase::Two,
///     event: "default".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(log.records().len(), 1);
/// assert_eq!(log.path(), vec![Phase::One, Phase::Two]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionLog<K: StateKind> {
    records: Vec<TransitionRecord<K>>,
}

impl<K: StateKind> Default for TransitionLog<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKind> TransitionLog<K> {
    /// Create a new empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record, returning a new log. The original is unchanged.
    pub fn record(&self, record: TransitionRecord<K>) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All records in order.
    pub fn records(&self) -> &[TransitionRecord<K>] {
        &self.records
    }

    /// The most recent record, if any.
    pub fn last(&self) -> Option<&TransitionRecord<K>> {
        self.records.last()
    }

    /// The path of states traversed: the first record's `from`, then each
    /// record's `to`. Empty for an empty log.
    pub fn path(&self) -> Vec<K> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(first.from);
        }
        for record in &self.records {
            path.push(record.to);
        }
        path
    }
}
