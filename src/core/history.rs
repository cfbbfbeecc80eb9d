//! State transition history tracking.
//!
//! Machines record every completed hand-off so hosts can inspect the path
//! an agent took. History is diagnostic only and is never used to restore a
//! machine.

use super::id::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single completed transition.
///
/// # Example
///
/// ```rust
/// use brainstem::core::StateTransition;
/// use brainstem::state_id;
/// use chrono::Utc;
///
/// state_id! {
///     enum Task {
///         null: None,
///         Pending,
///         Running,
///     }
/// }
///
/// let transition = StateTransition {
///     from: Task::Pending,
///     to: Task::Running,
///     trigger: Task::Running,
///     timestamp: Utc::now(),
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<I: StateId> {
    /// The state being transitioned from
    pub from: I,
    /// The state being transitioned to
    pub to: I,
    /// The transition identifier the host requested
    pub trigger: I,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of completed transitions.
///
/// With a limit set, the oldest records are dropped first once the history
/// is full.
///
/// # Example
///
/// ```rust
/// use brainstem::core::{StateHistory, StateTransition};
/// use brainstem::state_id;
/// use chrono::Utc;
///
/// state_id! {
///     enum Work {
///         null: None,
///         Start,
///         Middle,
///         End,
///     }
/// }
///
/// let mut history = StateHistory::new();
///
/// history.record(StateTransition {
///     from: Work::Start,
///     to: Work::Middle,
///     trigger: Work::Middle,
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: Work::Middle,
///     to: Work::End,
///     trigger: Work::End,
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![Work::Start, Work::Middle, Work::End]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<I: StateId> {
    transitions: VecDeque<StateTransition<I>>,
    limit: Option<usize>,
}

impl<I: StateId> Default for StateHistory<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: StateId> StateHistory<I> {
    /// Create a new, unbounded history.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: None,
        }
    }

    /// Create a history keeping at most `limit` records.
    ///
    /// Storage grows with the records actually kept, not with `limit`.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: Some(limit),
        }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Record a completed transition, evicting the oldest record if full.
    pub fn record(&mut self, transition: StateTransition<I>) {
        if self.limit == Some(0) {
            return;
        }
        if let Some(limit) = self.limit {
            while self.transitions.len() >= limit {
                self.transitions.pop_front();
            }
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` of the oldest retained record followed by the `to`
    /// of each record.
    pub fn get_path(&self) -> Vec<I> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    /// Calculate total duration from first to last retained transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get the most recent transition.
    pub fn last(&self) -> Option<&StateTransition<I>> {
        self.transitions.back()
    }

    /// Iterate over retained transitions, oldest first.
    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<I>> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_id;

    state_id! {
        enum TestId {
            null: Null,
            Initial,
            Processing,
            Complete,
        }
    }

    fn hop(from: TestId, to: TestId) -> StateTransition<TestId> {
        StateTransition {
            from,
            to,
            trigger: to,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn unbounded_limit_keeps_every_record() {
        let mut history = StateHistory::with_limit(usize::MAX);
        history.record(hop(TestId::Initial, TestId::Processing));
        history.record(hop(TestId::Processing, TestId::Complete));

        assert_eq!(history.limit(), Some(usize::MAX));
        assert_eq!(
            history.get_path(),
            vec![TestId::Initial, TestId::Processing, TestId::Complete]
        );
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestId> = StateHistory::new();
        assert_eq!(history.len(), 0);
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert!(history.last().is_none());
    }

    #[test]
    fn record_adds_transition() {
        let mut history = StateHistory::new();
        history.record(hop(TestId::Initial, TestId::Processing));

        assert_eq!(history.len(), 1);
        assert_eq!(history.last().map(|t| t.to), Some(TestId::Processing));
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let mut history = StateHistory::new();
        history.record(hop(TestId::Initial, TestId::Processing));
        history.record(hop(TestId::Processing, TestId::Complete));

        assert_eq!(
            history.get_path(),
            vec![TestId::Initial, TestId::Processing, TestId::Complete]
        );
    }

    #[test]
    fn limit_evicts_oldest_records() {
        let mut history = StateHistory::with_limit(2);
        history.record(hop(TestId::Initial, TestId::Processing));
        history.record(hop(TestId::Processing, TestId::Complete));
        history.record(hop(TestId::Complete, TestId::Initial));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get_path(),
            vec![TestId::Processing, TestId::Complete, TestId::Initial]
        );
    }

    #[test]
    fn zero_limit_records_nothing() {
        let mut history = StateHistory::with_limit(0);
        history.record(hop(TestId::Initial, TestId::Processing));
        assert!(history.is_empty());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::new();
        history.record(hop(TestId::Initial, TestId::Processing));

        std::thread::sleep(std::time::Duration::from_millis(10));

        history.record(hop(TestId::Processing, TestId::Complete));

        let duration = history.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn single_transition_has_duration_zero() {
        let mut history = StateHistory::new();
        history.record(hop(TestId::Initial, TestId::Processing));

        assert_eq!(history.duration(), Some(std::time::Duration::from_secs(0)));
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::with_limit(8);
        history.record(hop(TestId::Initial, TestId::Processing));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestId> = serde_json::from_str(&json).unwrap();

        assert_eq!(history.len(), deserialized.len());
        assert_eq!(deserialized.limit(), Some(8));
        assert_eq!(history.get_path(), deserialized.get_path());
    }

    #[test]
    fn clear_empties_history() {
        let mut history = StateHistory::new();
        history.record(hop(TestId::Initial, TestId::Processing));
        history.clear();
        assert!(history.is_empty());
    }
}
