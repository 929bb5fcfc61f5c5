//! Moon orbit pacing and domain limits.

use std::time::Duration;

use super::{require_positive, ConfigError};

/// Closest Moon distance accepted from the UI (multiples of the reference distance)
pub const MIN_MOON_DISTANCE: f32 = 1.0;

/// Farthest Moon distance accepted from the UI
pub const MAX_MOON_DISTANCE: f32 = 4.0;

/// Orbit animation parameters
///
/// At the defaults a full orbit takes 1800 ticks (30 s at 60 Hz).
/// This is UI pacing, not a physical period.
#[derive(Debug, Clone)]
pub struct OrbitParams {
    /// Orbit advance per animation tick (degrees)
    pub step_degrees: f32,

    /// Animation cadence (ticks per second)
    pub ticks_per_second: f32,

    /// Moon distance at scene start (reference multiples)
    pub initial_distance: f32,

    /// Moon orbit angle at scene start (degrees)
    pub initial_angle_degrees: f32,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            step_degrees: 0.2,
            ticks_per_second: 60.0,
            initial_distance: 1.5,
            initial_angle_degrees: 0.0,
        }
    }
}

impl OrbitParams {
    /// Wall-clock time between ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.ticks_per_second)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("ticks_per_second", self.ticks_per_second)?;
        if !self.step_degrees.is_finite() {
            return Err(ConfigError::NotPositive {
                name: "step_degrees",
                value: self.step_degrees,
            });
        }
        if !(MIN_MOON_DISTANCE..=MAX_MOON_DISTANCE).contains(&self.initial_distance) {
            return Err(ConfigError::MoonDistanceOutOfRange(self.initial_distance));
        }
        Ok(())
    }
}
