//! Actions: a control law gated by a schedule and bound to a commandable.

use crate::action::schedule::Schedule;
use crate::core::{Clock, CommandError, Commandable, SystemClock};
use std::any::Any;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a single `update()` call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ActionError {
    #[error("Command rejected: {0}")]
    Command(#[from] CommandError),
}

/// What an `update()` call did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Update {
    /// The control law ran after `delta_seconds` and its output was forwarded.
    Ran { delta_seconds: f64 },

    /// Less than one period has elapsed; nothing happened.
    Waiting,
}

impl Update {
    pub fn ran(&self) -> bool {
        matches!(self, Self::Ran { .. })
    }
}

/// A scheduled unit of control logic.
///
/// States hold actions as `Box<dyn Action>`; the downcast hooks let callers
/// reach the concrete action (for example to retune a PID) through a state.
pub trait Action: 'static {
    /// Run the control law if a full period has elapsed since the last run.
    ///
    /// Never blocks. Errors from the commandable are returned as-is; the
    /// caller decides whether to retry, skip or halt.
    fn update(&mut self) -> Result<Update, ActionError>;

    /// The fixed update period.
    fn period(&self) -> Duration;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A control law invoked by a scheduling gate.
pub trait ControlLaw {
    /// Value produced for the commandable.
    type Output: Copy;

    /// Compute the next command after `delta_seconds` of continuous time.
    fn compute(&mut self, delta_seconds: f64) -> Self::Output;
}

/// Generic [`Action`]: periodic gate + control law + commandable target.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use tickwise::action::{Action, ControlLaw, ScheduledAction, Update};
/// use tickwise::core::{CommandError, Commandable, ManualClock};
///
/// struct Constant(i32);
///
/// impl ControlLaw for Constant {
///     type Output = i32;
///     fn compute(&mut self, _delta_seconds: f64) -> i32 {
///         self.0
///     }
/// }
///
/// struct Sink(Vec<i32>);
///
/// impl Commandable<i32> for Sink {
///     fn set_value(&mut self, value: i32) -> Result<(), CommandError> {
///         self.0.push(value);
///         Ok(())
///     }
/// }
///
/// let clock = ManualClock::new();
/// let mut action = ScheduledAction::with_clock(
///     Duration::from_millis(10),
///     Constant(5),
///     Sink(Vec::new()),
///     clock.clone(),
/// );
///
/// assert_eq!(action.update().unwrap(), Update::Waiting);
/// clock.advance(Duration::from_millis(10));
/// assert!(action.update().unwrap().ran());
/// assert_eq!(action.target().0, vec![5]);
/// ```
pub struct ScheduledAction<L, C, K = SystemClock> {
    schedule: Schedule,
    law: L,
    target: C,
    clock: K,
}

impl<L, C> ScheduledAction<L, C, SystemClock>
where
    L: ControlLaw,
    C: Commandable<L::Output>,
{
    /// Create an action driven by the wall clock.
    pub fn new(period: Duration, law: L, target: C) -> Self {
        Self::with_clock(period, law, target, SystemClock)
    }
}

impl<L, C, K> ScheduledAction<L, C, K>
where
    L: ControlLaw,
    C: Commandable<L::Output>,
    K: Clock,
{
    /// Create an action driven by `clock`. The first period starts now.
    pub fn with_clock(period: Duration, law: L, target: C, clock: K) -> Self {
        let schedule = Schedule::new(period, clock.now());
        Self {
            schedule,
            law,
            target,
            clock,
        }
    }

    pub fn law(&self) -> &L {
        &self.law
    }

    /// Mutable access to the control law. Changes apply on the next run.
    pub fn law_mut(&mut self) -> &mut L {
        &mut self.law
    }

    pub fn target(&self) -> &C {
        &self.target
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    fn run_gate(&mut self) -> Result<Update, ActionError> {
        let Some(delta_seconds) = self.schedule.poll(self.clock.now()) else {
            return Ok(Update::Waiting);
        };

        let value = self.law.compute(delta_seconds);
        self.target.set_value(value)?;
        Ok(Update::Ran { delta_seconds })
    }
}

impl<L, C, K> Action for ScheduledAction<L, C, K>
where
    L: ControlLaw + 'static,
    C: Commandable<L::Output> + 'static,
    K: Clock + 'static,
{
    fn update(&mut self) -> Result<Update, ActionError> {
        self.run_gate()
    }

    fn period(&self) -> Duration {
        self.schedule.period()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Counts invocations and echoes the last delta it saw.
    #[derive(Default)]
    struct Probe {
        calls: usize,
        last_delta: f64,
    }

    impl ControlLaw for Probe {
        type Output = f64;

        fn compute(&mut self, delta_seconds: f64) -> f64 {
            self.calls += 1;
            self.last_delta = delta_seconds;
            delta_seconds
        }
    }

    #[derive(Default)]
    struct Sink {
        values: Vec<f64>,
        fail: bool,
    }

    impl Commandable<f64> for Sink {
        fn set_value(&mut self, value: f64) -> Result<(), CommandError> {
            if self.fail {
                return Err(CommandError::DeviceUnavailable {
                    device: "sink".to_string(),
                });
            }
            self.values.push(value);
            Ok(())
        }
    }

    fn action(
        period_ms: u64,
    ) -> (
        ScheduledAction<Probe, Rc<RefCell<Sink>>, ManualClock>,
        Rc<RefCell<Sink>>,
        ManualClock,
    ) {
        let clock = ManualClock::new();
        let sink = Rc::new(RefCell::new(Sink::default()));
        let action = ScheduledAction::with_clock(
            Duration::from_millis(period_ms),
            Probe::default(),
            Rc::clone(&sink),
            clock.clone(),
        );
        (action, sink, clock)
    }

    #[test]
    fn does_not_run_before_period() {
        let (mut action, sink, clock) = action(20);

        clock.advance(Duration::from_millis(19));
        assert_eq!(action.update().unwrap(), Update::Waiting);
        assert_eq!(action.law().calls, 0);
        assert!(sink.borrow().values.is_empty());
    }

    #[test]
    fn runs_exactly_once_per_elapsed_period() {
        let (mut action, sink, clock) = action(20);

        clock.advance(Duration::from_millis(20));
        assert!(action.update().unwrap().ran());
        assert_eq!(action.update().unwrap(), Update::Waiting);

        assert_eq!(action.law().calls, 1);
        assert_eq!(sink.borrow().values.len(), 1);
    }

    #[test]
    fn forwards_the_real_elapsed_time() {
        let (mut action, sink, clock) = action(20);

        clock.advance(Duration::from_millis(35));
        let update = action.update().unwrap();

        assert_eq!(update, Update::Ran { delta_seconds: 0.035 });
        assert_eq!(sink.borrow().values, vec![0.035]);
    }

    #[test]
    fn commandable_failure_is_propagated() {
        let (mut action, sink, clock) = action(10);
        sink.borrow_mut().fail = true;

        clock.advance(Duration::from_millis(10));
        let result = action.update();

        assert_eq!(
            result,
            Err(ActionError::Command(CommandError::DeviceUnavailable {
                device: "sink".to_string()
            }))
        );
        // the period still restarts; failure policy is the caller's
        assert_eq!(action.update(), Ok(Update::Waiting));
    }

    #[test]
    fn boxed_action_can_be_downcast() {
        let (action, _sink, _clock) = action(10);
        let mut boxed: Box<dyn Action> = Box::new(action);

        assert_eq!(boxed.period(), Duration::from_millis(10));
        let concrete = boxed
            .as_any_mut()
            .downcast_mut::<ScheduledAction<Probe, Rc<RefCell<Sink>>, ManualClock>>();
        assert!(concrete.is_some());
    }
}
