//! The PID control law.

use crate::core::{clamp_between, ControlValue};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Shortest interval, in seconds, over which a derivative is computed.
pub const DEFAULT_DERIVATIVE_EPSILON: f64 = 0.001;

/// Proportional, integral and derivative gains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    pub p: f64,
    pub i: f64,
    pub d: f64,
}

impl PidGains {
    pub fn new(p: f64, i: f64, d: f64) -> Self {
        Self { p, i, d }
    }
}

/// The terms that made up the most recent output, narrowed to the commanded type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PidTerms<W> {
    pub p: W,
    pub i: W,
    pub d: W,
    /// Clamped value that was commanded.
    pub output: W,
}

/// PID control law over a commanded type `W`.
///
/// The law is a two-state machine: until it has run once it is *unprimed* and
/// its derivative term is zero; afterwards it has a derivative baseline. The
/// integral accumulator and priming are only cleared at construction or by an
/// explicit [`PidLaw::reset`]; none of the setters touch them.
///
/// All arithmetic happens in `f64`. Each step:
///
/// 1. `error = setpoint - measured`, `p = kp * error`
/// 2. `integral += ki * error * dt`, clamped into the integral bounds
/// 3. `d = (last_measured - measured) * kd / dt` when primed and `dt` exceeds
///    the derivative epsilon, else `0` (and the law becomes primed)
/// 4. `output = clamp(p + integral + d + offset)` into the output bounds
///
/// A step whose error is not finite (a `NaN` or infinite reading or setpoint)
/// is skipped: the integral and derivative baseline are left as they were
/// and the clamped offset is commanded.
///
/// # Example
///
/// ```rust
/// use tickwise::pid::{PidGains, PidLaw};
///
/// let mut law = PidLaw::<f64>::new(PidGains::new(1.0, 0.0, 0.0))
///     .with_bounds(-100.0, 100.0)
///     .with_offset(-3.0);
///
/// assert_eq!(law.step(10.0, 4.0, 0.02), 3.0);
/// ```
#[derive(Clone, Debug)]
pub struct PidLaw<W: ControlValue> {
    gains: PidGains,
    min_value: W,
    max_value: W,
    min_i: W,
    max_i: W,
    offset: W,
    derivative_epsilon: f64,

    integral: f64,
    last_measured: f64,
    primed: bool,
    terms: Option<PidTerms<W>>,
}

impl<W: ControlValue> PidLaw<W> {
    /// Unbounded law with the given gains and no offset.
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            min_value: W::lowest(),
            max_value: W::highest(),
            min_i: W::lowest(),
            max_i: W::highest(),
            offset: W::zero(),
            derivative_epsilon: DEFAULT_DERIVATIVE_EPSILON,
            integral: 0.0,
            last_measured: 0.0,
            primed: false,
            terms: None,
        }
    }

    pub fn with_bounds(mut self, min_value: W, max_value: W) -> Self {
        self.set_bounds(min_value, max_value);
        self
    }

    pub fn with_i_bounds(mut self, min_i: W, max_i: W) -> Self {
        self.set_i_bounds(min_i, max_i);
        self
    }

    pub fn with_offset(mut self, offset: W) -> Self {
        self.set_offset(offset);
        self
    }

    pub fn with_derivative_epsilon(mut self, seconds: f64) -> Self {
        self.derivative_epsilon = seconds;
        self
    }

    /// Seed the integral accumulator, clamped into the integral bounds set so far.
    pub fn with_integral(mut self, initial: f64) -> Self {
        self.integral = clamp_between(initial, self.min_i.to_f64(), self.max_i.to_f64());
        self
    }

    /// Run one step of the law and return the clamped command.
    pub fn step(&mut self, setpoint: f64, measured: f64, delta_seconds: f64) -> W {
        let error = setpoint - measured;
        if !error.is_finite() {
            warn!(setpoint, measured, "non-finite pid error, step skipped");
            return self.hold_offset();
        }
        let p = self.gains.p * error;

        self.integral = clamp_between(
            self.integral + self.gains.i * error * delta_seconds,
            self.min_i.to_f64(),
            self.max_i.to_f64(),
        );

        let d = if self.primed && delta_seconds > self.derivative_epsilon {
            (self.last_measured - measured) * self.gains.d / delta_seconds
        } else {
            self.primed = true;
            0.0
        };

        let raw = p + self.integral + d + self.offset.to_f64();
        let output = W::from_f64(clamp_between(
            raw,
            self.min_value.to_f64(),
            self.max_value.to_f64(),
        ));

        self.last_measured = measured;
        self.terms = Some(PidTerms {
            p: W::from_f64(p),
            i: W::from_f64(self.integral),
            d: W::from_f64(d),
            output,
        });
        output
    }

    fn hold_offset(&mut self) -> W {
        let output = W::from_f64(clamp_between(
            self.offset.to_f64(),
            self.min_value.to_f64(),
            self.max_value.to_f64(),
        ));
        self.terms = Some(PidTerms {
            p: W::zero(),
            i: W::from_f64(self.integral),
            d: W::zero(),
            output,
        });
        output
    }

    pub fn set_pid_constants(&mut self, p: f64, i: f64, d: f64) {
        self.gains = PidGains { p, i, d };
    }

    pub fn set_bounds(&mut self, min_value: W, max_value: W) {
        self.min_value = min_value;
        self.max_value = max_value;
    }

    /// Takes effect at the next step; the current accumulator is not re-clamped.
    pub fn set_i_bounds(&mut self, min_i: W, max_i: W) {
        self.min_i = min_i;
        self.max_i = max_i;
    }

    pub fn set_offset(&mut self, offset: W) {
        self.offset = offset;
    }

    pub fn set_derivative_epsilon(&mut self, seconds: f64) {
        self.derivative_epsilon = seconds;
    }

    /// Clear the integral accumulator and the derivative baseline.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.last_measured = 0.0;
        self.primed = false;
        self.terms = None;
    }

    pub fn gains(&self) -> PidGains {
        self.gains
    }

    pub fn bounds(&self) -> (W, W) {
        (self.min_value, self.max_value)
    }

    pub fn i_bounds(&self) -> (W, W) {
        (self.min_i, self.max_i)
    }

    pub fn offset(&self) -> W {
        self.offset
    }

    pub fn derivative_epsilon(&self) -> f64 {
        self.derivative_epsilon
    }

    /// The integral accumulator, kept at full precision.
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Whether a derivative baseline exists.
    pub fn is_primed(&self) -> bool {
        self.primed
    }

    /// Terms of the last step, `None` before the first step.
    pub fn terms(&self) -> Option<PidTerms<W>> {
        self.terms
    }
}

/// The fixed-type controller for one-off loops that already own their timing,
/// such as a flywheel velocity loop in operator control.
pub type SimplePid = PidLaw<f64>;

impl PidLaw<f64> {
    /// Step toward `target` from `input` and remember the output.
    pub fn compute(&mut self, target: f64, input: f64, delta_seconds: f64) -> f64 {
        self.step(target, input, delta_seconds)
    }

    /// Last computed output, `0.0` before the first step.
    pub fn output(&self) -> f64 {
        self.terms.map_or(0.0, |terms| terms.output)
    }
}
