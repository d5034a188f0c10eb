//! Builder for PID actions.

use crate::action::ScheduledAction;
use crate::builder::error::BuildError;
use crate::config::PidConfig;
use crate::core::{Clock, Commandable, ControlValue, Feedback, SystemClock};
use crate::pid::{PidAction, PidController, PidGains};
use std::time::Duration;
use stillwater::validation::Validation;

/// Builder for [`PidAction`]s.
///
/// Settings start from [`PidConfig::default`]; `build` validates them and
/// refuses to produce an action from a bad configuration, so an action that
/// exists is always runnable.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use tickwise::builder::PidActionBuilder;
/// use tickwise::core::{CommandError, Commandable, Feedback};
///
/// struct Motor;
///
/// impl Commandable<i32> for Motor {
///     fn set_value(&mut self, _value: i32) -> Result<(), CommandError> {
///         Ok(())
///     }
/// }
///
/// let rpm = Feedback::new(0.0_f64);
/// let flywheel = PidActionBuilder::new()
///     .gains(0.2, 0.1, 0.0)
///     .bounds(-127, 127)
///     .i_bounds(-127, 127)
///     .period(Duration::from_millis(20))
///     .feedback(rpm.clone())
///     .setpoint(3600.0)
///     .build(Motor)
///     .unwrap();
///
/// assert_eq!(flywheel.controller().setpoint(), 3600.0);
/// ```
pub struct PidActionBuilder<R: ControlValue, W: ControlValue> {
    config: PidConfig<W>,
    period: Duration,
    feedback: Option<Feedback<R>>,
    setpoint: R,
    initial_integral: f64,
}

impl<R: ControlValue, W: ControlValue> PidActionBuilder<R, W> {
    pub fn new() -> Self {
        let config = PidConfig::default();
        Self {
            period: config.update_period(),
            config,
            feedback: None,
            setpoint: R::zero(),
            initial_integral: 0.0,
        }
    }

    /// Replace every tunable setting, including the update period.
    pub fn config(mut self, config: PidConfig<W>) -> Self {
        self.period = config.update_period();
        self.config = config;
        self
    }

    pub fn gains(mut self, p: f64, i: f64, d: f64) -> Self {
        self.config.gains = PidGains::new(p, i, d);
        self
    }

    pub fn bounds(mut self, min_value: W, max_value: W) -> Self {
        self.config.min_value = min_value;
        self.config.max_value = max_value;
        self
    }

    pub fn i_bounds(mut self, min_i: W, max_i: W) -> Self {
        self.config.min_i = min_i;
        self.config.max_i = max_i;
        self
    }

    pub fn offset(mut self, offset: W) -> Self {
        self.config.offset = offset;
        self
    }

    pub fn period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn derivative_epsilon(mut self, seconds: f64) -> Self {
        self.config.derivative_epsilon = seconds;
        self
    }

    /// Seed the integral accumulator (clamped into the integral bounds).
    pub fn initial_integral(mut self, value: f64) -> Self {
        self.initial_integral = value;
        self
    }

    /// The live sensed value the controller reads each run (required).
    pub fn feedback(mut self, feedback: Feedback<R>) -> Self {
        self.feedback = Some(feedback);
        self
    }

    /// Target value; defaults to zero.
    pub fn setpoint(mut self, setpoint: R) -> Self {
        self.setpoint = setpoint;
        self
    }

    /// Build an action commanding `target` on the wall clock.
    pub fn build<C>(self, target: C) -> Result<PidAction<R, W, C>, BuildError>
    where
        C: Commandable<W>,
    {
        self.build_with_clock(target, SystemClock)
    }

    /// Build an action commanding `target`, timed by `clock`.
    pub fn build_with_clock<C, K>(
        self,
        target: C,
        clock: K,
    ) -> Result<PidAction<R, W, C, K>, BuildError>
    where
        C: Commandable<W>,
        K: Clock,
    {
        let feedback = self.feedback.ok_or(BuildError::MissingFeedback)?;

        if let Validation::Failure(violations) = self.config.validate() {
            return Err(BuildError::InvalidConfig(
                violations.iter().cloned().collect(),
            ));
        }

        let law = self.config.to_law().with_integral(self.initial_integral);
        let controller = PidController::new(law, feedback, self.setpoint);
        Ok(ScheduledAction::with_clock(
            self.period,
            controller,
            target,
            clock,
        ))
    }
}

impl<R: ControlValue, W: ControlValue> Default for PidActionBuilder<R, W> {
    fn default() -> Self {
        Self::new()
    }
}
