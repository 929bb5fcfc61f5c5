//! Ocean mesh shaping parameters.

use log::warn;

use super::{require_positive, ConfigError};
use crate::tide::MAX_TIDE_HEIGHT;

/// Lower bound on the radial scale of a displaced vertex (keeps troughs outside the origin)
pub const MIN_SCALE: f32 = 0.1;

/// Tidal mesh generation parameters
#[derive(Debug, Clone)]
pub struct MeshParams {
    /// Latitude/longitude segment count (96 = 9,409 vertices)
    /// Lower values for constrained devices. Keep it even: an odd grid has no
    /// antipodal vertex pairs, so near and far bulges come out unequal
    pub tessellation: u32,

    /// Earth radius in scene units; the ocean shell sits at earth_radius + tide_height
    pub earth_radius: f32,

    /// Radial gain applied to bulge · tide_height (dimensionless)
    /// Formula: scale = 1 + bulge * tide_height * gain
    pub bulge_gain: f32,

    /// Depth of the low-water ring at 90° from the Moon axis, as a fraction of the crest
    /// Profile: cos²(angle) - trough * sin²(angle)
    pub trough: f32,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            tessellation: 96, // Smooth enough for the figure-8 silhouette
            earth_radius: 1.0,
            bulge_gain: 4.0,
            trough: 0.25,
        }
    }
}

impl MeshParams {
    /// Reduced tessellation for constrained devices
    pub fn low_detail() -> Self {
        Self {
            tessellation: 48,
            ..Self::default()
        }
    }

    /// Even tessellation gives a grid where every vertex has an antipodal twin
    pub fn has_symmetric_grid(&self) -> bool {
        self.tessellation % 2 == 0
    }

    /// Validate configuration (non-zero tessellation, trough cannot invert the shell)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tessellation == 0 {
            return Err(ConfigError::ZeroTessellation(self.tessellation));
        }
        if !self.has_symmetric_grid() {
            warn!(
                "Odd tessellation {} breaks near/far bulge symmetry; prefer an even count",
                self.tessellation
            );
        }
        require_positive("earth_radius", self.earth_radius)?;
        require_positive("bulge_gain", self.bulge_gain)?;

        // Deepest trough at the highest tide must stay above MIN_SCALE
        let deepest = 1.0 - self.trough * MAX_TIDE_HEIGHT * self.bulge_gain;
        if !self.trough.is_finite() || self.trough < 0.0 || deepest < MIN_SCALE {
            return Err(ConfigError::CollapsingTrough {
                trough: self.trough,
                gain: self.bulge_gain,
            });
        }
        Ok(())
    }
}
