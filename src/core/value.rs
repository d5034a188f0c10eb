//! Numeric capability shared by sensed and commanded values.
//!
//! Controllers never do arithmetic in the value types themselves. Every value is
//! widened to `f64`, combined there, and narrowed back only when a result is
//! assigned to an output field.

use std::fmt::Debug;

/// A scalar that a controller can read or command.
///
/// Implemented for every primitive integer and float type. Narrowing from `f64`
/// rounds to the nearest value and saturates at the type's limits; `NaN` narrows
/// to zero for integer types.
///
/// # Example
///
/// ```rust
/// use tickwise::core::ControlValue;
///
/// assert_eq!(i16::from_f64(12.6), 13);
/// assert_eq!(u8::from_f64(-4.0), 0);
/// assert_eq!(i32::from_f64(1e12), i32::MAX);
/// assert_eq!(2.5f32.to_f64(), 2.5);
/// ```
pub trait ControlValue: Copy + PartialOrd + Debug + 'static {
    /// Widen to the `f64` accumulator.
    fn to_f64(self) -> f64;

    /// Narrow from the `f64` accumulator.
    fn from_f64(value: f64) -> Self;

    /// Smallest representable value, used as the default lower bound.
    fn lowest() -> Self;

    /// Largest representable value, used as the default upper bound.
    fn highest() -> Self;

    /// The additive identity.
    fn zero() -> Self {
        Self::from_f64(0.0)
    }
}

macro_rules! impl_control_value_int {
    ($($t:ty),* $(,)?) => {
        $(
            impl ControlValue for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    // `as` saturates and maps NaN to zero
                    value.round() as $t
                }

                fn lowest() -> Self {
                    <$t>::MIN
                }

                fn highest() -> Self {
                    <$t>::MAX
                }
            }
        )*
    };
}

macro_rules! impl_control_value_float {
    ($($t:ty),* $(,)?) => {
        $(
            impl ControlValue for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    value as $t
                }

                fn lowest() -> Self {
                    <$t>::MIN
                }

                fn highest() -> Self {
                    <$t>::MAX
                }
            }
        )*
    };
}

impl_control_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_control_value_float!(f32, f64);

/// Clamp `value` into `[min, max]`, checking the upper bound first.
///
/// Unlike [`f64::clamp`] this never panics when `min > max`; bounds set through
/// unvalidated setters simply resolve to `max` for values above it and `min`
/// otherwise. `NaN` resolves to `min`.
pub(crate) fn clamp_between(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}
