//! Builder API for ergonomic construction of actions, states and machines.
//!
//! Every builder validates what it produces: a PID action cannot exist
//! without feedback or with an invalid configuration, and a machine cannot
//! exist with a dangling transition or a missing initial state.

pub mod error;
pub mod machine;
pub mod pid;
pub mod state;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use pid::PidActionBuilder;
pub use state::StateBuilder;
