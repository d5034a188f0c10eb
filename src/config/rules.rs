//! Validation rules for controller configuration.
//!
//! Every rule runs; failures are accumulated with Stillwater's `Validation`
//! so a bad configuration file reports all of its problems at once.

use crate::config::pid::PidConfig;
use crate::core::ControlValue;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A single broken configuration rule.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("Gain '{term}' must be finite (got {value})")]
    NonFiniteGain { term: char, value: f64 },

    #[error("Output bounds are inverted: min {min} > max {max}")]
    InvertedBounds { min: f64, max: f64 },

    #[error("Integral bounds are inverted: min {min} > max {max}")]
    InvertedIntegralBounds { min: f64, max: f64 },

    #[error("Derivative epsilon must be a finite, non-negative number of seconds (got {0})")]
    InvalidDerivativeEpsilon(f64),
}

type Check = Validation<(), NonEmptyVec<ConfigViolation>>;

fn require(ok: bool, violation: impl FnOnce() -> ConfigViolation) -> Check {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

fn finite_gain(term: char, value: f64) -> Check {
    require(value.is_finite(), || ConfigViolation::NonFiniteGain { term, value })
}

fn ordered(min: f64, max: f64, violation: fn(f64, f64) -> ConfigViolation) -> Check {
    require(min <= max, || violation(min, max))
}

/// Run every rule against `config`.
pub fn validate<W: ControlValue>(config: &PidConfig<W>) -> Check {
    let gains = config.gains;
    let epsilon = config.derivative_epsilon;

    let checks = vec![
        finite_gain('p', gains.p),
        finite_gain('i', gains.i),
        finite_gain('d', gains.d),
        ordered(
            config.min_value.to_f64(),
            config.max_value.to_f64(),
            |min, max| ConfigViolation::InvertedBounds { min, max },
        ),
        ordered(config.min_i.to_f64(), config.max_i.to_f64(), |min, max| {
            ConfigViolation::InvertedIntegralBounds { min, max }
        }),
        require(epsilon.is_finite() && epsilon >= 0.0, || {
            ConfigViolation::InvalidDerivativeEpsilon(epsilon)
        }),
    ];

    Validation::all_vec(checks).map(|_| ())
}
