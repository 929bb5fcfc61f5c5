//! Moon orbital state: angle and distance on a circular orbit in the XZ plane.

use glam::Vec3;

use crate::params::{OrbitParams, MAX_MOON_DISTANCE, MIN_MOON_DISTANCE};

/// Wrap an angle into `[0, 360)` degrees
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Clamp a Moon distance into the supported domain
pub fn clamp_distance(distance: f32) -> f32 {
    distance.clamp(MIN_MOON_DISTANCE, MAX_MOON_DISTANCE)
}

/// Moon position on its orbit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalState {
    angle_degrees: f32,
    distance: f32,
}

impl OrbitalState {
    /// Inputs are wrapped and clamped into their domains
    pub fn new(angle_degrees: f32, distance: f32) -> Self {
        Self {
            angle_degrees: wrap_degrees(angle_degrees),
            distance: clamp_distance(distance),
        }
    }

    pub fn from_params(params: &OrbitParams) -> Self {
        Self::new(params.initial_angle_degrees, params.initial_distance)
    }

    pub fn angle_degrees(&self) -> f32 {
        self.angle_degrees
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn set_angle(&mut self, angle_degrees: f32) {
        self.angle_degrees = wrap_degrees(angle_degrees);
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = clamp_distance(distance);
    }

    /// Advance along the orbit, wrapping at 360°
    pub fn advance(&mut self, delta_degrees: f32) {
        self.set_angle(self.angle_degrees + delta_degrees);
    }

    /// Cartesian Moon position `(d·cos a, 0, d·sin a)`
    pub fn moon_position(&self) -> Vec3 {
        let (sin, cos) = self.angle_degrees.to_radians().sin_cos();
        Vec3::new(self.distance * cos, 0.0, self.distance * sin)
    }

    /// Unit Earth–Moon direction
    pub fn moon_direction(&self) -> Vec3 {
        let (sin, cos) = self.angle_degrees.to_radians().sin_cos();
        Vec3::new(cos, 0.0, sin)
    }
}

impl Default for OrbitalState {
    fn default() -> Self {
        Self::from_params(&OrbitParams::default())
    }
}
