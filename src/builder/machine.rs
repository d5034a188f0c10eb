//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::machine::{State, StateMachine, DEFAULT_HISTORY_LIMIT};

/// Builder for constructing state machines with a fluent API.
///
/// `build` checks the graph: state names are unique, the initial state exists
/// and every transition points at a known state.
pub struct StateMachineBuilder {
    initial: Option<String>,
    states: Vec<State>,
    history_limit: usize,
}

impl StateMachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initial = Some(name.into());
        self
    }

    /// Add a state.
    pub fn state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    /// Add multiple states at once.
    pub fn states(mut self, states: Vec<State>) -> Self {
        self.states.extend(states);
        self
    }

    /// How many transitions the machine's history retains.
    /// Defaults to [`DEFAULT_HISTORY_LIMIT`].
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing or the graph is broken.
    pub fn build(self) -> Result<StateMachine, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        for (position, state) in self.states.iter().enumerate() {
            if self.states[..position]
                .iter()
                .any(|earlier| earlier.name() == state.name())
            {
                return Err(BuildError::DuplicateState(state.name().to_string()));
            }
        }

        for state in &self.states {
            for transition in state.transitions() {
                let target = transition.next_state();
                if !self.states.iter().any(|candidate| candidate.name() == target) {
                    return Err(BuildError::UnknownTransitionTarget {
                        from: state.name().to_string(),
                        to: target.to_string(),
                    });
                }
            }
        }

        let position = self
            .states
            .iter()
            .position(|state| state.name() == initial)
            .ok_or(BuildError::UnknownInitialState(initial))?;

        Ok(StateMachine::new(self.states, position, self.history_limit))
    }
}

impl Default for StateMachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
