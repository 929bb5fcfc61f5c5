//! Tidal sphere mesh: a UV sphere pushed out along the Earth–Moon axis.
//!
//! The bulge depends on `|dot|` between a vertex direction and the Moon axis, so the
//! near side and the far side rise by the same amount (the double-bulge tidal profile).

use std::f32::consts::PI;

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

use crate::params::{MeshParams, MIN_SCALE};

/// Untouched water color (RGBA, alpha is the water transparency)
pub const DEEP_WATER: Vec4 = Vec4::new(0.0, 0.4, 1.0, 0.8);

/// Color at full bulge
pub const CREST_WATER: Vec4 = Vec4::new(0.0, 1.0, 1.0, 0.8);

/// Interleaved vertex for GPU upload (position + normal + color)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

/// Bulge shaping knobs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulgeShape {
    /// scale = 1 + bulge * tide_height * gain
    pub gain: f32,

    /// Low-water depth at 90° from the Moon axis
    pub trough: f32,
}

impl Default for BulgeShape {
    fn default() -> Self {
        Self::from(&MeshParams::default())
    }
}

impl From<&MeshParams> for BulgeShape {
    fn from(params: &MeshParams) -> Self {
        Self {
            gain: params.bulge_gain,
            trough: params.trough,
        }
    }
}

/// Renderable triangle mesh with parallel vertex attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TidalMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub colors: Vec<Vec4>,
    /// Triangle list, counter-clockwise seen from outside
    pub indices: Vec<u32>,
}

impl TidalMesh {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Parallel arrays agree in length and every index is in range
    pub fn is_consistent(&self) -> bool {
        let n = self.positions.len();
        self.normals.len() == n
            && self.colors.len() == n
            && self.indices.len() % 3 == 0
            && self.indices.iter().all(|&i| (i as usize) < n)
    }

    /// Interleave attributes into a vertex buffer
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.colors)
            .map(|((p, n), c)| Vertex {
                position: p.to_array(),
                normal: n.to_array(),
                color: c.to_array(),
            })
            .collect()
    }

    /// Raw bytes of the interleaved vertex buffer
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.interleaved()).to_vec()
    }

    /// Raw bytes of the index buffer
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Double-lobed bulge profile over the angle from the Moon axis (radians, `[0, π/2]`)
///
/// 1.0 on the axis, `-trough` on the 90° ring.
pub fn bulge_profile(angle: f32, trough: f32) -> f32 {
    let (sin, cos) = angle.sin_cos();
    cos * cos - trough * sin * sin
}

/// Normalize the Moon direction, falling back to +X for zero or non-finite input
pub fn resolve_moon_direction(direction: Vec3) -> Vec3 {
    direction.try_normalize().unwrap_or(Vec3::X)
}

/// Water color for a vertex scaled by `scale`
pub fn water_color(scale: f32) -> Vec4 {
    let intensity = ((scale - 1.0) * 2.0).clamp(0.0, 1.0);
    // Only RGB shifts; the water transparency stays fixed
    DEEP_WATER
        .truncate()
        .lerp(CREST_WATER.truncate(), intensity)
        .extend(DEEP_WATER.w)
}

/// Generate the tidal sphere with default bulge shaping
pub fn generate(
    radius: f32,
    tide_height: f32,
    moon_direction: Vec3,
    tessellation: u32,
) -> TidalMesh {
    generate_with_shape(
        radius,
        tide_height,
        moon_direction,
        tessellation,
        BulgeShape::default(),
    )
}

/// Generate the tidal sphere
///
/// # Arguments
/// * `radius` - Undeformed sphere radius (scene units)
/// * `tide_height` - Bulge height (display units); negative or non-finite is treated as 0
/// * `moon_direction` - Earth–Moon axis; normalized here, zero falls back to +X
/// * `tessellation` - Latitude and longitude segment count; near and far bulges
///   match exactly only for even counts, where the grid is antipodally symmetric
/// * `shape` - Bulge gain and trough depth
///
/// # Panics
/// If `tessellation` is 0 or `radius` is not positive. Both are programming errors.
pub fn generate_with_shape(
    radius: f32,
    tide_height: f32,
    moon_direction: Vec3,
    tessellation: u32,
    shape: BulgeShape,
) -> TidalMesh {
    assert!(tessellation > 0, "tessellation must be at least 1");
    assert!(
        radius.is_finite() && radius > 0.0,
        "radius must be positive, got {radius}"
    );

    let tide_height = if !tide_height.is_finite() {
        0.0
    } else {
        tide_height.max(0.0)
    };
    let axis = resolve_moon_direction(moon_direction);
    let segments = tessellation as usize;
    let vertex_count = (segments + 1) * (segments + 1);

    let mut positions = Vec::with_capacity(vertex_count);
    let mut normals = Vec::with_capacity(vertex_count);
    let mut colors = Vec::with_capacity(vertex_count);

    for lat in 0..=segments {
        let theta = lat as f32 * PI / segments as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for lon in 0..=segments {
            let phi = lon as f32 * 2.0 * PI / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            // Y-up unit sphere
            let unit = Vec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);

            let dot = unit.dot(axis).abs().min(1.0);
            let angle = dot.acos();
            let bulge = bulge_profile(angle, shape.trough);

            let scale = (1.0 + bulge * tide_height * shape.gain).max(MIN_SCALE);
            let position = unit * radius * scale;

            positions.push(position);
            normals.push(position.try_normalize().unwrap_or(unit));
            colors.push(water_color(scale));
        }
    }

    let mut indices = Vec::with_capacity(segments * segments * 6);
    let row = segments + 1;

    // Two triangles per quad, counter-clockwise from outside
    for lat in 0..segments {
        for lon in 0..segments {
            let top_left = (lat * row + lon) as u32;
            let top_right = top_left + 1;
            let bottom_left = ((lat + 1) * row + lon) as u32;
            let bottom_right = bottom_left + 1;

            indices.extend_from_slice(&[
                top_left,
                top_right,
                bottom_left,
                top_right,
                bottom_right,
                bottom_left,
            ]);
        }
    }

    TidalMesh {
        positions,
        normals,
        colors,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_mesh_counts() {
        for n in [1u32, 2, 3, 8, 17] {
            let mesh = generate(1.0, 0.1, Vec3::X, n);
            let n = n as usize;
            assert_eq!(mesh.vertex_count(), (n + 1).pow(2));
            assert_eq!(mesh.indices.len(), n.pow(2) * 6);
            assert!(mesh.is_consistent());
        }
    }

    #[test]
    fn test_zero_tide_is_undeformed_sphere() {
        let radius = 1.3;
        for dir in [Vec3::X, Vec3::new(0.3, -0.7, 0.2), Vec3::Z] {
            let mesh = generate(radius, 0.0, dir, 24);
            for p in &mesh.positions {
                assert!((p.length() - radius).abs() < EPS, "vertex at {}", p.length());
            }
        }
    }

    #[test]
    fn test_negative_and_nan_tide_clamped() {
        let flat = generate(1.0, 0.0, Vec3::X, 12);
        assert_eq!(generate(1.0, -0.5, Vec3::X, 12), flat);
        assert_eq!(generate(1.0, f32::NAN, Vec3::X, 12), flat);
    }

    #[test]
    fn test_infinite_tide_clamped() {
        let flat = generate(1.0, 0.0, Vec3::X, 12);
        let mesh = generate(1.0, f32::INFINITY, Vec3::X, 12);
        assert_eq!(mesh, flat);
        assert!(mesh.positions.iter().all(|p| p.is_finite()));
        assert_eq!(generate(1.0, f32::NEG_INFINITY, Vec3::X, 12), flat);
    }

    #[test]
    fn test_zero_direction_falls_back_to_x() {
        let fallback = generate(1.0, 0.15, Vec3::ZERO, 16);
        let x_axis = generate(1.0, 0.15, Vec3::X, 16);
        assert_eq!(fallback, x_axis);

        let nan = generate(1.0, 0.15, Vec3::splat(f32::NAN), 16);
        assert_eq!(nan, x_axis);
    }

    #[test]
    fn test_direction_is_normalized() {
        let scaled = generate(1.0, 0.15, Vec3::new(0.0, 0.0, 7.0), 16);
        let unit = generate(1.0, 0.15, Vec3::Z, 16);
        for (a, b) in scaled.positions.iter().zip(&unit.positions) {
            assert!(a.distance(*b) < EPS);
        }
    }

    #[test]
    #[should_panic(expected = "tessellation")]
    fn test_zero_tessellation_panics() {
        generate(1.0, 0.1, Vec3::X, 0);
    }

    #[test]
    fn test_double_bulge_symmetry() {
        let radius = 1.0;
        let dir = Vec3::new(0.3, 0.5, 0.8).normalize();
        let mesh = generate(radius, 0.2, dir, 32);

        let closest_to = |target: Vec3| {
            mesh.positions
                .iter()
                .max_by(|a, b| a.normalize().dot(target).total_cmp(&b.normalize().dot(target)))
                .copied()
                .unwrap()
        };

        let near = closest_to(dir);
        let far = closest_to(-dir);
        let near_disp = near.length() - radius;
        let far_disp = far.length() - radius;

        assert!(near_disp > 0.0);
        assert!((near_disp - far_disp).abs() < EPS, "{near_disp} vs {far_disp}");
    }

    #[test]
    fn test_double_bulge_symmetry_even_tessellations() {
        let dirs = [Vec3::X, Vec3::Z, Vec3::new(-0.6, 0.2, 0.7).normalize()];
        for n in [2u32, 4, 8, 16, 48, 96] {
            for dir in dirs {
                let mesh = generate(1.0, 0.2, dir, n);
                let closest_len = |target: Vec3| {
                    mesh.positions
                        .iter()
                        .max_by(|a, b| {
                            a.normalize().dot(target).total_cmp(&b.normalize().dot(target))
                        })
                        .map(|p| p.length())
                        .unwrap()
                };
                let near = closest_len(dir);
                let far = closest_len(-dir);
                assert!((near - far).abs() < EPS, "n={n} dir={dir}: {near} vs {far}");
            }
        }
    }

    #[test]
    fn test_bulge_peaks_on_axis_and_dips_at_ring() {
        let trough = 0.25;
        assert!((bulge_profile(0.0, trough) - 1.0).abs() < EPS);
        assert!((bulge_profile(PI / 2.0, trough) + trough).abs() < EPS);

        // Monotonic fall from axis to ring
        let mut prev = bulge_profile(0.0, trough);
        for step in 1..=90 {
            let b = bulge_profile((step as f32).to_radians(), trough);
            assert!(b <= prev + 1e-6);
            prev = b;
        }
    }

    #[test]
    fn test_bulge_maxima_on_moon_axis() {
        let mesh = generate(1.0, 0.2, Vec3::X, 32);
        let max_len = mesh
            .positions
            .iter()
            .map(|p| p.length())
            .fold(0.0f32, f32::max);

        for p in mesh.positions.iter().filter(|p| p.length() > max_len - EPS) {
            assert!(p.normalize().x.abs() > 0.99, "peak off axis at {p}");
        }

        // Equator ring at 90° sits below the undeformed radius
        let ring = mesh
            .positions
            .iter()
            .filter(|p| p.normalize().x.abs() < 1e-3)
            .map(|p| p.length());
        for len in ring {
            assert!(len < 1.0);
        }
    }

    #[test]
    fn test_ccw_winding_faces_outward() {
        let mesh = generate(1.0, 0.15, Vec3::new(1.0, 0.2, 0.4), 20);
        for tri in mesh.indices.chunks(3) {
            let a = mesh.positions[tri[0] as usize];
            let b = mesh.positions[tri[1] as usize];
            let c = mesh.positions[tri[2] as usize];
            let normal = (b - a).cross(c - a);
            if normal.length() < 1e-6 {
                continue; // Degenerate pole triangle
            }
            assert!(normal.dot(a + b + c) > 0.0);
        }
    }

    #[test]
    fn test_normals_are_unit_and_radial() {
        let mesh = generate(2.0, 0.1, Vec3::Z, 16);
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!((n.length() - 1.0).abs() < EPS);
            assert!(n.dot(p.normalize()) > 1.0 - EPS);
        }
    }

    #[test]
    fn test_colors_brighten_with_bulge() {
        assert_eq!(water_color(1.0), DEEP_WATER);
        assert_eq!(water_color(0.8), DEEP_WATER);
        assert!(water_color(2.0).abs_diff_eq(CREST_WATER, 1e-6));

        let mesh = generate(1.0, 0.2, Vec3::X, 16);
        for c in &mesh.colors {
            assert_eq!(c.w, 0.8);
        }
        for scale in [1.1, 1.25, 1.37, 1.5] {
            assert_eq!(water_color(scale).w, DEEP_WATER.w);
        }
    }

    #[test]
    fn test_vertex_buffer_layout() {
        let mesh = generate(1.0, 0.1, Vec3::X, 4);
        assert_eq!(std::mem::size_of::<Vertex>(), 40);
        assert_eq!(mesh.vertex_bytes().len(), mesh.vertex_count() * 40);
        assert_eq!(mesh.index_bytes().len(), mesh.indices.len() * 4);
    }

    #[test]
    fn test_deterministic() {
        let a = generate(1.0, 0.13, Vec3::new(0.2, 0.0, 0.9), 20);
        let b = generate(1.0, 0.13, Vec3::new(0.2, 0.0, 0.9), 20);
        assert_eq!(a, b);
    }
}
