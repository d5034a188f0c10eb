//! Live sensed values shared between a producer and the controllers reading them.

use crate::core::value::ControlValue;
use std::cell::Cell;
use std::rc::Rc;

/// A readable location holding the latest sensed value.
///
/// The sensor side writes with [`Feedback::set`] before each tick; every
/// controller holding a clone reads the same slot with [`Feedback::get`].
/// Controllers only ever read.
///
/// # Example
///
/// ```rust
/// use tickwise::core::Feedback;
///
/// let encoder = Feedback::new(0.0_f64);
/// let seen_by_controller = encoder.clone();
///
/// encoder.set(42.5);
/// assert_eq!(seen_by_controller.get(), 42.5);
/// ```
#[derive(Debug)]
pub struct Feedback<R: ControlValue> {
    slot: Rc<Cell<R>>,
}

impl<R: ControlValue> Feedback<R> {
    pub fn new(initial: R) -> Self {
        Self {
            slot: Rc::new(Cell::new(initial)),
        }
    }

    /// Read the latest value.
    pub fn get(&self) -> R {
        self.slot.get()
    }

    /// Publish a new value.
    pub fn set(&self, value: R) {
        self.slot.set(value);
    }
}

impl<R: ControlValue> Clone for Feedback<R> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<R: ControlValue + Default> Default for Feedback<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}
