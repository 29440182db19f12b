//! State transition history tracking.
//!
//! Keeps a bounded, timestamped record of the state changes a machine has
//! gone through, most recent last.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt::Debug;

/// Default number of transitions retained by [`StateHistory::default`].
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Marker for the input that caused a transition.
pub trait Trigger:
    Copy + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync
{
}

impl<T> Trigger for T where
    T: Copy + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync
{
}

/// Record of a single state change.
///
/// # Example
///
/// ```rust
/// use vendstate::core::StateTransition;
/// use vendstate::controller::{ActionKind, MachineState};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: MachineState::NoFunds,
///     to: MachineState::HasFunds,
///     trigger: ActionKind::InsertFunds,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, MachineState::HasFunds);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State, T: Trigger> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The input that caused the change
    pub trigger: T,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered, bounded history of state transitions.
///
/// Once `limit` transitions are held, recording a new one evicts the
/// oldest. A limit of zero disables recording entirely.
///
/// # Example
///
/// ```rust
/// use vendstate::core::{StateHistory, StateTransition};
/// use vendstate::controller::{ActionKind, MachineState};
/// use chrono::Utc;
///
/// let history = StateHistory::with_limit(8)
///     .record(StateTransition {
///         from: MachineState::NoFunds,
///         to: MachineState::HasFunds,
///         trigger: ActionKind::InsertFunds,
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: MachineState::HasFunds,
///         to: MachineState::Dispensing,
///         trigger: ActionKind::SelectProduct,
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(
///     path,
///     vec![
///         &MachineState::NoFunds,
///         &MachineState::HasFunds,
///         &MachineState::Dispensing
///     ]
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State, T: Trigger> {
    limit: usize,
    transitions: VecDeque<StateTransition<S, T>>,
}

impl<S: State, T: Trigger> Default for StateHistory<S, T> {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl<S: State, T: Trigger> StateHistory<S, T> {
    /// Create a new empty history retaining at most `limit` transitions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            transitions: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: StateTransition<S, T>) -> Self {
        let mut next = self.clone();
        next.push(transition);
        next
    }

    pub(crate) fn push(&mut self, transition: StateTransition<S, T>) {
        if self.limit == 0 {
            return;
        }
        while self.transitions.len() >= self.limit {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained transition followed
    /// by the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// All retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition<S, T>> {
        self.transitions.iter()
    }

    /// The most recent transition, if any.
    pub fn last(&self) -> Option<&StateTransition<S, T>> {
        self.transitions.back()
    }

    /// Number of retained transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Whether no transitions are retained.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Maximum number of transitions retained.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
    enum Light {
        Red,
        Green,
        Yellow,
    }

    impl State for Light {
        fn name(&self) -> &'static str {
            match self {
                Self::Red => "Red",
                Self::Green => "Green",
                Self::Yellow => "Yellow",
            }
        }
    }

    #[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
    struct Tick;

    fn transition(from: Light, to: Light) -> StateTransition<Light, Tick> {
        StateTransition {
            from,
            to,
            trigger: Tick,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<Light, Tick> = StateHistory::default();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.last().is_none());
        assert_eq!(history.limit(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::with_limit(4);
        let next = history.record(transition(Light::Red, Light::Green));

        assert_eq!(history.len(), 0);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::with_limit(4)
            .record(transition(Light::Red, Light::Green))
            .record(transition(Light::Green, Light::Yellow));

        assert_eq!(
            history.get_path(),
            vec![&Light::Red, &Light::Green, &Light::Yellow]
        );
    }

    #[test]
    fn oldest_transitions_are_evicted_at_limit() {
        let mut history = StateHistory::with_limit(2);
        history.push(transition(Light::Red, Light::Green));
        history.push(transition(Light::Green, Light::Yellow));
        history.push(transition(Light::Yellow, Light::Red));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get_path(),
            vec![&Light::Green, &Light::Yellow, &Light::Red]
        );
        assert_eq!(history.last().map(|t| t.to), Some(Light::Red));
    }

    #[test]
    fn zero_limit_disables_recording() {
        let mut history = StateHistory::with_limit(0);
        history.push(transition(Light::Red, Light::Green));
        assert!(history.is_empty());
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::with_limit(3).record(transition(Light::Red, Light::Green));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<Light, Tick> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, history);
    }
}
