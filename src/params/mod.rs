//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (degrees, seconds, display units, etc.)
//! - Documented ranges and meanings
//! - Validation where a bad value would break the pipeline

mod ocean;
mod orbit;
mod render;

use thiserror::Error;

// Re-export all types
pub use ocean::{MeshParams, MIN_SCALE};
pub use orbit::{OrbitParams, MAX_MOON_DISTANCE, MIN_MOON_DISTANCE};
pub use render::{SceneLayout, SnapshotConfig};

/// Rejected configuration value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Tessellation must be at least 1, got {0}")]
    ZeroTessellation(u32),

    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("Bulge trough {trough} with gain {gain} would collapse the ocean surface")]
    CollapsingTrough { trough: f32, gain: f32 },

    #[error("Moon distance {0} is outside [1.0, 4.0]")]
    MoonDistanceOutOfRange(f32),

    #[error("Snapshot size must be non-zero, got {0}x{1}")]
    EmptySnapshot(u32, u32),
}

pub(crate) fn require_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}
