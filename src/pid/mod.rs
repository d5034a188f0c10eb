//! PID control.
//!
//! - [`PidLaw`]: the control law itself, generic over the commanded type
//! - [`PidController`]: a law bound to a live [`Feedback`](crate::core::Feedback)
//!   and a setpoint, usable as a [`ControlLaw`](crate::action::ControlLaw)
//! - [`PidAction`]: a controller scheduled against a commandable
//! - [`SimplePid`]: the `f64` specialization for loops that own their timing

mod controller;
mod law;

pub use controller::{PidAction, PidController};
pub use law::{PidGains, PidLaw, PidTerms, SimplePid, DEFAULT_DERIVATIVE_EPSILON};
