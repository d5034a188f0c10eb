//! The capability to accept a command value.
//!
//! Anything that owns an actuator (a motor, a pneumatic valve, a display line)
//! implements [`Commandable`] for the scalar type it accepts. Failures are
//! reported, never retried here; retry policy belongs to whoever drives the tick.

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

/// Errors an actuator can report when it is commanded.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CommandError {
    #[error("Device '{device}' is not responding")]
    DeviceUnavailable { device: String },

    #[error("Device '{device}' rejected the command: {reason}")]
    Rejected { device: String, reason: String },
}

/// Accepts command values for an actuator.
///
/// # Example
///
/// ```rust
/// use tickwise::core::{CommandError, Commandable};
///
/// struct Motor {
///     voltage: i32,
/// }
///
/// impl Commandable<i32> for Motor {
///     fn set_value(&mut self, value: i32) -> Result<(), CommandError> {
///         self.voltage = value;
///         Ok(())
///     }
/// }
///
/// let mut motor = Motor { voltage: 0 };
/// motor.set_value(90).unwrap();
/// assert_eq!(motor.voltage, 90);
/// ```
pub trait Commandable<W> {
    /// Send `value` to the underlying actuator.
    fn set_value(&mut self, value: W) -> Result<(), CommandError>;
}

impl<W, T: Commandable<W> + ?Sized> Commandable<W> for &mut T {
    fn set_value(&mut self, value: W) -> Result<(), CommandError> {
        (**self).set_value(value)
    }
}

impl<W, T: Commandable<W> + ?Sized> Commandable<W> for Box<T> {
    fn set_value(&mut self, value: W) -> Result<(), CommandError> {
        (**self).set_value(value)
    }
}

/// Shared handle: the action commands the actuator while the owner keeps
/// access to it between ticks. Panics if the actuator is already borrowed.
impl<W, T: Commandable<W> + ?Sized> Commandable<W> for Rc<RefCell<T>> {
    fn set_value(&mut self, value: W) -> Result<(), CommandError> {
        self.borrow_mut().set_value(value)
    }
}
