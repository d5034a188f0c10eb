//! Controller configuration.
//!
//! [`PidConfig`] is plain serde data, so gains and limits can live in a JSON
//! file next to the robot program. [`PidConfig::validate`] runs every rule in
//! [`rules`] and reports all violations together instead of stopping at the first.
//!
//! # Example
//!
//! ```rust
//! use tickwise::config::PidConfig;
//! use stillwater::validation::Validation;
//!
//! let config: PidConfig<f64> = PidConfig {
//!     min_value: 1.0,
//!     max_value: -1.0,
//!     derivative_epsilon: -0.5,
//!     ..PidConfig::default()
//! };
//!
//! match config.validate() {
//!     Validation::Failure(violations) => assert_eq!(violations.len(), 2),
//!     Validation::Success(_) => unreachable!(),
//! }
//! ```

pub mod error;
pub mod pid;
pub mod rules;

pub use error::ConfigError;
pub use pid::{PidConfig, DEFAULT_UPDATE_PERIOD_MS};
pub use rules::ConfigViolation;
