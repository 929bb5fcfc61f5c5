//! Ocean shell builder: turns tide state into a mesh using the configured shaping.

use glam::Vec3;

use super::mesh::{generate_with_shape, BulgeShape, TidalMesh};
use crate::params::MeshParams;

/// Ocean shell around the Earth, rebuilt from tide height and Moon position
#[derive(Debug, Clone)]
pub struct OceanSystem {
    pub params: MeshParams,
    shape: BulgeShape,
}

impl OceanSystem {
    pub fn new(params: MeshParams) -> Self {
        let shape = BulgeShape::from(&params);
        Self { params, shape }
    }

    /// Shell radius: the ocean sits `tide_height` above the Earth surface
    pub fn shell_radius(&self, tide_height: f32) -> f32 {
        self.params.earth_radius + tide_height.max(0.0)
    }

    /// Build a fresh mesh for the current tide
    ///
    /// # Arguments
    /// * `tide_height` - Current bulge height (display units)
    /// * `moon_position` - Moon position relative to the Earth center
    pub fn build(&self, tide_height: f32, moon_position: Vec3) -> TidalMesh {
        generate_with_shape(
            self.shell_radius(tide_height),
            tide_height,
            moon_position,
            self.params.tessellation,
            self.shape,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ocean_mesh_creation() {
        let params = MeshParams {
            tessellation: 16,
            ..MeshParams::default()
        };
        let ocean = OceanSystem::new(params.clone());
        let mesh = ocean.build(0.1, Vec3::new(1.5, 0.0, 0.0));

        // Check vertex count: (tessellation + 1)^2
        assert_eq!(mesh.vertex_count(), (params.tessellation as usize + 1).pow(2));

        // Check triangle count: tessellation^2 * 2 triangles
        assert_eq!(mesh.triangle_count(), (params.tessellation as usize).pow(2) * 2);
    }

    #[test]
    fn test_shell_sits_above_earth() {
        let ocean = OceanSystem::new(MeshParams::default());
        assert_eq!(ocean.shell_radius(0.0), 1.0);
        assert!((ocean.shell_radius(0.2) - 1.2).abs() < 1e-6);
        assert_eq!(ocean.shell_radius(-1.0), 1.0);
    }

    #[test]
    fn test_flat_ocean_without_tide() {
        let ocean = OceanSystem::new(MeshParams::low_detail());
        let mesh = ocean.build(0.0, Vec3::new(0.0, 0.0, 2.0));
        for p in &mesh.positions {
            assert!((p.length() - 1.0).abs() < 1e-4);
        }
    }
}
