//! State transition history tracking.
//!
//! The machine keeps an in-memory, ordered record of the transitions it takes,
//! capped at a retention limit so a machine that runs forever stays bounded.
//! Nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use tickwise::machine::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "SpinUp".to_string(),
///     to: "Hold".to_string(),
///     timestamp: Utc::now(),
///     tick: 42,
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: String,
    /// The state being transitioned to
    pub to: String,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
    /// The machine tick on which the transition fired
    pub tick: u64,
}

/// Ordered history of state transitions.
///
/// `record` returns a new history with the transition added, leaving the
/// original untouched; `push` appends in place. A history created with
/// [`StateHistory::with_limit`] keeps only the most recent transitions,
/// dropping the oldest first.
///
/// # Example
///
/// ```rust
/// use tickwise::machine::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: "Idle".to_string(),
///         to: "SpinUp".to_string(),
///         timestamp: Utc::now(),
///         tick: 1,
///     })
///     .record(StateTransition {
///         from: "SpinUp".to_string(),
///         to: "Hold".to_string(),
///         timestamp: Utc::now(),
///         tick: 30,
///     });
///
/// assert_eq!(history.get_path(), vec!["Idle", "SpinUp", "Hold"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: VecDeque<StateTransition>,
    #[serde(default)]
    limit: Option<usize>,
}

impl StateHistory {
    /// An unbounded history.
    pub fn new() -> Self {
        Self {
            transitions: VecDeque::new(),
            limit: None,
        }
    }

    /// A history retaining at most `limit` transitions.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(limit),
            limit: Some(limit),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut history = self.clone();
        history.push(transition);
        history
    }

    /// Append a transition in place, evicting the oldest past the limit.
    pub fn push(&mut self, transition: StateTransition) {
        self.transitions.push_back(transition);
        if let Some(limit) = self.limit {
            while self.transitions.len() > limit {
                self.transitions.pop_front();
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns state names in order: the first retained `from` state, then
    /// the `to` state of each retained transition.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from.as_str());
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
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

    /// Retained transitions, oldest first.
    pub fn transitions(&self) -> impl ExactSizeIterator<Item = &StateTransition> {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Retention limit, `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}
