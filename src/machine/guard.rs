//! Guard predicates for controlling state transitions.
//!
//! Guards take no arguments: they read whatever external state they captured
//! (a sensor slot, a button flag, a timer) and answer whether a transition
//! should fire. Evaluating a guard has no side effects of its own.

use std::fmt;

/// Zero-argument predicate deciding whether a transition fires.
///
/// # Example
///
/// ```rust
/// use tickwise::core::Feedback;
/// use tickwise::machine::Guard;
///
/// let rpm = Feedback::new(0.0_f64);
/// let reading = rpm.clone();
/// let at_speed = Guard::new(move || reading.get() >= 3500.0);
///
/// assert!(!at_speed.check());
/// rpm.set(3600.0);
/// assert!(at_speed.check());
/// ```
pub struct Guard {
    predicate: Box<dyn Fn() -> bool>,
}

impl Guard {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// A guard that always fires.
    pub fn always() -> Self {
        Self::new(|| true)
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> bool {
        (self.predicate)()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn guard_reads_captured_state() {
        let flag = Rc::new(Cell::new(false));
        let seen = Rc::clone(&flag);
        let guard = Guard::new(move || seen.get());

        assert!(!guard.check());
        flag.set(true);
        assert!(guard.check());
    }

    #[test]
    fn always_fires() {
        assert!(Guard::always().check());
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|| 2 + 2 == 4);

        let result1 = guard.check();
        let result2 = guard.check();

        assert_eq!(result1, result2);
    }
}
