//! Build errors for actions, states and state machines.

use crate::config::error::join_violations;
use crate::config::ConfigViolation;
use thiserror::Error;

/// Errors that can occur when building actions, states and state machines.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(name) before .build()")]
    MissingInitialState,

    #[error("Initial state '{0}' is not one of the machine's states")]
    UnknownInitialState(String),

    #[error("State '{0}' is defined more than once")]
    DuplicateState(String),

    #[error("State '{state}' registers action '{action}' more than once")]
    DuplicateAction { state: String, action: String },

    #[error("State '{from}' has a transition to unknown state '{to}'")]
    UnknownTransitionTarget { from: String, to: String },

    #[error("Controller feedback not specified. Call .feedback(handle)")]
    MissingFeedback,

    #[error("Invalid controller configuration: {}", join_violations(.0))]
    InvalidConfig(Vec<ConfigViolation>),
}
