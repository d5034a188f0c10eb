//! Leaf capabilities the rest of the crate is built from.
//!
//! - `ControlValue`: numeric capability of sensed and commanded values
//! - `Commandable`: accepting a command value for an actuator
//! - `Feedback`: a shared, readable sensed-value slot
//! - `Clock`: the time source behind every scheduling gate

mod clock;
mod commandable;
mod feedback;
mod value;

pub use clock::{Clock, ManualClock, SystemClock};
pub use commandable::{CommandError, Commandable};
pub use feedback::Feedback;
pub use value::ControlValue;

pub(crate) use value::clamp_between;
