//! Serializable PID configuration.

use crate::config::error::ConfigError;
use crate::config::rules::{self, ConfigViolation};
use crate::core::ControlValue;
use crate::pid::{PidGains, PidLaw, DEFAULT_DERIVATIVE_EPSILON};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Default update period of a PID action.
pub const DEFAULT_UPDATE_PERIOD_MS: u64 = 10;

/// Everything needed to set up a PID action except its wiring
/// (feedback, setpoint and commandable).
///
/// Missing fields take their defaults when deserializing: zero gains,
/// unbounded output and integral, no offset, a 10 ms period and a 1 ms
/// derivative epsilon.
///
/// # Example
///
/// ```rust
/// use tickwise::config::PidConfig;
///
/// let config: PidConfig<i32> = PidConfig::from_json(
///     r#"{ "gains": { "p": 0.2, "i": 0.1, "d": 0.0 }, "min_value": -127, "max_value": 127 }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.max_value, 127);
/// assert_eq!(config.update_period_ms, 10);
/// assert!(config.validate().is_success());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(
    default,
    bound(
        serialize = "W: Serialize",
        deserialize = "W: ControlValue + Deserialize<'de>"
    )
)]
pub struct PidConfig<W: ControlValue> {
    pub gains: PidGains,
    pub min_value: W,
    pub max_value: W,
    pub min_i: W,
    pub max_i: W,
    pub offset: W,
    pub update_period_ms: u64,
    pub derivative_epsilon: f64,
}

impl<W: ControlValue> Default for PidConfig<W> {
    fn default() -> Self {
        Self {
            gains: PidGains::default(),
            min_value: W::lowest(),
            max_value: W::highest(),
            min_i: W::lowest(),
            max_i: W::highest(),
            offset: W::zero(),
            update_period_ms: DEFAULT_UPDATE_PERIOD_MS,
            derivative_epsilon: DEFAULT_DERIVATIVE_EPSILON,
        }
    }
}

impl<W: ControlValue> PidConfig<W> {
    pub fn update_period(&self) -> Duration {
        Duration::from_millis(self.update_period_ms)
    }

    /// Check every rule, reporting all violations together.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        rules::validate(self)
    }

    /// Like [`validate`](Self::validate), as a `Result`.
    pub fn validated(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(violations) => Err(ConfigError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }

    /// A fresh law carrying these gains, bounds, offset and epsilon.
    pub fn to_law(&self) -> PidLaw<W> {
        PidLaw::new(self.gains)
            .with_bounds(self.min_value, self.max_value)
            .with_i_bounds(self.min_i, self.max_i)
            .with_offset(self.offset)
            .with_derivative_epsilon(self.derivative_epsilon)
    }
}

impl<W> PidConfig<W>
where
    W: ControlValue + Serialize + for<'de> Deserialize<'de>,
{
    /// Parse a JSON document. The result is not validated.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
