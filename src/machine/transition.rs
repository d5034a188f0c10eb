//! Guarded transitions between named states.

use crate::machine::guard::Guard;

/// A guard plus the name of the state to move to when it fires.
///
/// Transitions are immutable once built and belong to exactly one state.
/// Evaluating one never logs or mutates anything; the machine reports the
/// move when it actually happens.
#[derive(Debug)]
pub struct Transition {
    guard: Guard,
    next_state: String,
}

impl Transition {
    pub fn new(guard: Guard, next_state: impl Into<String>) -> Self {
        Self {
            guard,
            next_state: next_state.into(),
        }
    }

    /// Transition firing whenever `predicate` returns true.
    pub fn when<F>(predicate: F, next_state: impl Into<String>) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Self::new(Guard::new(predicate), next_state)
    }

    /// Evaluate the guard.
    pub fn should_change_state(&self) -> bool {
        self.guard.check()
    }

    /// Name of the destination state.
    pub fn next_state(&self) -> &str {
        &self.next_state
    }
}
