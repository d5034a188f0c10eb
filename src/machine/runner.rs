//! The tick driver: owns the state graph and moves between states.

use crate::machine::history::{StateHistory, StateTransition};
use crate::machine::state::{ActionFault, State};
use chrono::Utc;
use std::collections::HashMap;
use stillwater::validation::Validation;
use tracing::{debug, info, warn};

/// Transitions a machine remembers unless told otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// Outcome of one [`StateMachine::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Actions of the (pre-transition) current state that failed this tick
    pub faults: Vec<ActionFault>,
    /// The transition taken at the end of the tick, if any
    pub transition: Option<StateTransition>,
}

impl TickReport {
    /// No action failed.
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }

    pub fn transitioned(&self) -> bool {
        self.transition.is_some()
    }
}

/// State machine runner.
///
/// Each tick updates the actions of the current state only, then evaluates
/// its transitions in order. On the first guard that fires, the destination
/// becomes current and its entry hook runs with the previous state, before
/// the next tick. Failures of individual actions are reported in the
/// [`TickReport`]; what to do about them is up to the caller.
///
/// Built with [`StateMachineBuilder`](crate::builder::StateMachineBuilder).
pub struct StateMachine {
    states: Vec<State>,
    index: HashMap<String, usize>,
    current: usize,
    history: StateHistory,
    ticks: u64,
    started: bool,
}

impl StateMachine {
    /// Transition targets must already be known to exist in `states`.
    pub(crate) fn new(states: Vec<State>, initial: usize, history_limit: usize) -> Self {
        let index = states
            .iter()
            .enumerate()
            .map(|(position, state)| (state.name().to_string(), position))
            .collect();
        Self {
            states,
            index,
            current: initial,
            history: StateHistory::with_limit(history_limit),
            ticks: 0,
            started: false,
        }
    }

    /// Enter the initial state, running its entry hook with itself as the
    /// previous state. Called by the first tick if not called explicitly;
    /// later calls do nothing.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        let initial = &self.states[self.current];
        info!(state = initial.name(), "state machine started");
        initial.on_state_entry(initial);
    }

    /// Run one scheduler tick.
    pub fn tick(&mut self) -> TickReport {
        self.start();
        self.ticks += 1;

        let state = &mut self.states[self.current];
        let faults: Vec<ActionFault> = match state.update_actions() {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(faults) => faults.iter().cloned().collect(),
        };
        for fault in &faults {
            warn!(
                state = state.name(),
                action = fault.action.as_str(),
                error = %fault.error,
                "action update failed"
            );
        }

        let transition = self.evaluate_transitions();
        TickReport { faults, transition }
    }

    fn evaluate_transitions(&mut self) -> Option<StateTransition> {
        let previous = self.current;
        let target = self.states[previous].next_state()?;
        let next = self.index[target];

        let record = StateTransition {
            from: self.states[previous].name().to_string(),
            to: target.to_string(),
            timestamp: Utc::now(),
            tick: self.ticks,
        };
        debug!(from = %record.from, to = %record.to, tick = self.ticks, "state transition");

        self.current = next;
        self.states[next].on_state_entry(&self.states[previous]);
        self.history.push(record.clone());
        Some(record)
    }

    pub fn current_state(&self) -> &State {
        &self.states[self.current]
    }

    /// Mutable access to the current state, e.g. to retune one of its actions.
    pub fn current_state_mut(&mut self) -> &mut State {
        &mut self.states[self.current]
    }

    pub fn state(&self, name: &str) -> Option<&State> {
        self.index.get(name).map(|&position| &self.states[position])
    }

    pub fn state_mut(&mut self, name: &str) -> Option<&mut State> {
        match self.index.get(name) {
            Some(&position) => Some(&mut self.states[position]),
            None => None,
        }
    }

    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.states.iter().map(State::name)
    }

    /// The most recent transitions, up to the machine's history limit.
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_started(&self) -> bool {
        self.started
    }
}

impl std::fmt::Debug for StateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current_state().name())
            .field("states", &self.state_names().collect::<Vec<_>>())
            .field("ticks", &self.ticks)
            .finish()
    }
}
