//! PID bound to a live sensed value and scheduled as an action.

use crate::action::{ControlLaw, ScheduledAction};
use crate::core::{Clock, Commandable, ControlValue, Feedback, SystemClock};
use crate::pid::law::{PidLaw, PidTerms};
use tracing::trace;

/// A [`PidLaw`] reading its measurement from a [`Feedback`] slot and steering
/// toward a setpoint of the sensed type `R`, producing commands of type `W`.
#[derive(Clone, Debug)]
pub struct PidController<R: ControlValue, W: ControlValue> {
    law: PidLaw<W>,
    feedback: Feedback<R>,
    setpoint: R,
}

impl<R: ControlValue, W: ControlValue> PidController<R, W> {
    pub fn new(law: PidLaw<W>, feedback: Feedback<R>, setpoint: R) -> Self {
        Self {
            law,
            feedback,
            setpoint,
        }
    }

    pub fn setpoint(&self) -> R {
        self.setpoint
    }

    /// Change the setpoint. The integral and derivative baseline are kept.
    pub fn set_target(&mut self, setpoint: R) {
        self.setpoint = setpoint;
    }

    pub fn feedback(&self) -> &Feedback<R> {
        &self.feedback
    }

    pub fn law(&self) -> &PidLaw<W> {
        &self.law
    }

    pub fn law_mut(&mut self) -> &mut PidLaw<W> {
        &mut self.law
    }
}

impl<R: ControlValue, W: ControlValue> ControlLaw for PidController<R, W> {
    type Output = W;

    fn compute(&mut self, delta_seconds: f64) -> W {
        let measured = self.feedback.get();
        let output = self
            .law
            .step(self.setpoint.to_f64(), measured.to_f64(), delta_seconds);
        trace!(
            delta_seconds,
            setpoint = ?self.setpoint,
            measured = ?measured,
            output = ?output,
            "pid step"
        );
        output
    }
}

/// A PID controller scheduled as an [`Action`](crate::action::Action).
pub type PidAction<R, W, C, K = SystemClock> = ScheduledAction<PidController<R, W>, C, K>;

impl<R, W, C, K> ScheduledAction<PidController<R, W>, C, K>
where
    R: ControlValue,
    W: ControlValue,
    C: Commandable<W>,
    K: Clock,
{
    pub fn controller(&self) -> &PidController<R, W> {
        self.law()
    }

    pub fn set_pid_constants(&mut self, p: f64, i: f64, d: f64) {
        self.law_mut().law_mut().set_pid_constants(p, i, d);
    }

    pub fn set_bounds(&mut self, min_value: W, max_value: W) {
        self.law_mut().law_mut().set_bounds(min_value, max_value);
    }

    pub fn set_i_bounds(&mut self, min_i: W, max_i: W) {
        self.law_mut().law_mut().set_i_bounds(min_i, max_i);
    }

    pub fn set_offset(&mut self, offset: W) {
        self.law_mut().law_mut().set_offset(offset);
    }

    pub fn set_target(&mut self, setpoint: R) {
        self.law_mut().set_target(setpoint);
    }

    pub fn integral(&self) -> f64 {
        self.law().law().integral()
    }

    pub fn terms(&self) -> Option<PidTerms<W>> {
        self.law().law().terms()
    }

    /// Clear the integral and derivative baseline on request.
    pub fn reset(&mut self) {
        self.law_mut().law_mut().reset();
    }
}
