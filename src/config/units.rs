//! Unit types for axis quantities.
//!
//! Positions are integer step counts and speeds are signed steps per second,
//! kept in separate newtypes so a speed can never be passed where a
//! position is expected.

use core::ops::Neg;

use serde::Deserialize;

/// Axis position in steps (absolute from the homed origin).
///
/// Uses i64 for unlimited range in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Steps(pub i64);

impl Steps {
    /// Position `delta` steps away, or `None` past the end of the i64 range.
    #[inline]
    pub fn checked_offset(self, delta: i64) -> Option<Self> {
        self.0.checked_add(delta).map(Self)
    }

    /// Convert a machine-unit coordinate to steps, rounding half up.
    ///
    /// `-50.5` becomes `-50` and `-50.6` becomes `-51`. Values beyond the
    /// i64 range saturate.
    #[inline]
    pub fn from_units_rounded(units: f64, steps_per_unit: f32) -> Self {
        Self(libm::floor(units * steps_per_unit as f64 + 0.5) as i64)
    }
}

/// Signed speed in steps per second.
///
/// The sign encodes direction, positive meaning increasing position.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct StepsPerSec(pub f32);

impl StepsPerSec {
    /// Speeds with a smaller magnitude are treated as "not moving".
    pub const EPSILON: f32 = 1e-6;

    /// Magnitude of the speed.
    #[inline]
    pub fn abs(self) -> Self {
        Self(libm::fabsf(self.0))
    }

    /// True when the magnitude is below [`Self::EPSILON`].
    #[inline]
    pub fn is_zero(self) -> bool {
        libm::fabsf(self.0) < Self::EPSILON
    }

    /// Interval between steps in microseconds at this speed.
    ///
    /// Returns `None` when the speed is effectively zero.
    #[inline]
    pub fn step_interval_us(self) -> Option<u64> {
        if self.is_zero() {
            None
        } else {
            Some((1_000_000.0 / libm::fabsf(self.0)) as u64)
        }
    }
}

impl Neg for StepsPerSec {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}
