//! Scene layout and snapshot configuration.

use super::ConfigError;

/// Fixed bodies of the Earth–Moon–Sun scene (scene units)
#[derive(Debug, Clone)]
pub struct SceneLayout {
    /// Sun position; the Sun never moves, so the Earth–Sun line is +X
    pub sun_position: [f32; 3],

    pub sun_radius: f32,

    pub moon_radius: f32,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            sun_position: [12.0, 0.0, 0.0],
            sun_radius: 4.0,
            moon_radius: 0.27,
        }
    }
}

/// PNG snapshot configuration
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Image width (pixels)
    pub width: u32,

    /// Image height (pixels)
    pub height: u32,

    /// Half-extent of the orthographic view (scene units)
    /// 4.5 keeps the Moon visible at its farthest distance
    pub half_extent: f32,

    /// Output file path
    pub output_path: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            half_extent: 4.5,
            output_path: "tidewave.png".to_string(),
        }
    }
}

impl SnapshotConfig {
    pub fn new(output_path: impl Into<String>, size: u32) -> Self {
        Self {
            width: size,
            height: size,
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptySnapshot(self.width, self.height));
        }
        super::require_positive("half_extent", self.half_extent)
    }
}
