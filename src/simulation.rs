//! Tide simulation state: orbit, tide type, derived tide height and the current mesh.
//!
//! All mutation goes through the setters so the tide height and mesh never go stale.
//! The mesh is published as an `Arc`, so a reader holding the previous mesh keeps a
//! complete copy while the next one is swapped in.

use std::sync::Arc;

use glam::Vec3;
use log::{debug, info, trace, warn};

use crate::ocean::{OceanSystem, TidalMesh};
use crate::orbit::OrbitalState;
use crate::params::{MeshParams, OrbitParams, SceneLayout};
use crate::tide::{
    clamp_tide_height, comparison_for, fact_for_height, real_world_height_m, TideComparison,
    TideModel, TideModelKind, TideType,
};

/// Presentation-facing snapshot of the simulation
#[derive(Debug, Clone, PartialEq)]
pub struct TideReadout {
    pub tide_type: TideType,
    pub tide_height: f32,
    pub real_world_height_m: f32,
    pub moon_orbit_angle: f32,
    pub moon_distance: f32,
    pub moon_position: Vec3,
    /// Angle between the Earth–Moon and Earth–Sun lines (degrees, `[0, 180]`)
    pub sun_moon_angle: f32,
    pub comparison: &'static TideComparison,
    pub fact: &'static str,
}

/// Single owner of the mutable tide state
pub struct TideSimulation {
    orbit: OrbitalState,
    tide_type: TideType,
    tide_height: f32,
    model: Box<dyn TideModel>,
    ocean: OceanSystem,
    layout: SceneLayout,
    mesh: Arc<TidalMesh>,
    /// Incremented on every mesh rebuild
    revision: u64,
}

impl TideSimulation {
    /// Create a simulation and build its first mesh
    pub fn new(orbit: &OrbitParams, mesh: MeshParams, model: Box<dyn TideModel>) -> Self {
        let mut sim = Self {
            orbit: OrbitalState::from_params(orbit),
            tide_type: TideType::default(),
            tide_height: 0.0,
            model,
            ocean: OceanSystem::new(mesh),
            layout: SceneLayout::default(),
            mesh: Arc::new(TidalMesh::default()),
            revision: 0,
        };
        sim.update_moon_position();
        info!(
            "Tide simulation ready ({} model, tessellation {})",
            sim.model.name(),
            sim.ocean.params.tessellation
        );
        sim
    }

    pub fn with_defaults(kind: TideModelKind) -> Self {
        Self::new(&OrbitParams::default(), MeshParams::default(), kind.build())
    }

    /// Select a tide type and move the Moon to its preset
    pub fn set_tide_type(&mut self, tide_type: TideType) {
        let preset = tide_type.preset();
        info!(
            "Tide type: {} (angle {}°, distance {})",
            tide_type, preset.orbit_angle_degrees, preset.moon_distance
        );

        self.tide_type = tide_type;
        self.orbit.set_angle(preset.orbit_angle_degrees);
        self.orbit.set_distance(preset.moon_distance);
        self.update_moon_position();
    }

    /// Advance the Moon along its orbit
    pub fn step_orbit(&mut self, delta_degrees: f32) {
        if !delta_degrees.is_finite() {
            warn!("Ignoring non-finite orbit step {}", delta_degrees);
            return;
        }
        self.orbit.advance(delta_degrees);
        self.update_moon_position();
    }

    /// Slider input: clamped into `[1, 4]`
    pub fn set_moon_distance(&mut self, distance: f32) {
        if !distance.is_finite() {
            warn!("Ignoring non-finite moon distance {}", distance);
            return;
        }
        self.orbit.set_distance(distance);
        self.update_moon_position();
    }

    /// Slider input: wrapped into `[0, 360)`
    pub fn set_moon_orbit_angle(&mut self, angle_degrees: f32) {
        if !angle_degrees.is_finite() {
            warn!("Ignoring non-finite orbit angle {}", angle_degrees);
            return;
        }
        self.orbit.set_angle(angle_degrees);
        self.update_moon_position();
    }

    /// Recompute tide height and rebuild the mesh from the current state
    pub fn update_moon_position(&mut self) {
        let angle = self.orbit.angle_degrees();
        let distance = self.orbit.distance();

        self.tide_height =
            clamp_tide_height(self.model.compute_tide_height(self.tide_type, angle, distance));

        let mesh = self
            .ocean
            .build(self.tide_height, self.orbit.moon_position());
        debug_assert!(mesh.is_consistent());

        self.mesh = Arc::new(mesh);
        self.revision += 1;

        trace!(
            "Rebuilt ocean #{}: angle {:.1}°, distance {:.2}, height {:.3}",
            self.revision,
            angle,
            distance,
            self.tide_height
        );
    }

    /// Swap the tide model and recompute
    pub fn set_model(&mut self, model: Box<dyn TideModel>) {
        debug!("Tide model: {} -> {}", self.model.name(), model.name());
        self.model = model;
        self.update_moon_position();
    }

    pub fn tide_type(&self) -> TideType {
        self.tide_type
    }

    pub fn tide_height(&self) -> f32 {
        self.tide_height
    }

    pub fn moon_orbit_angle(&self) -> f32 {
        self.orbit.angle_degrees()
    }

    pub fn moon_distance(&self) -> f32 {
        self.orbit.distance()
    }

    pub fn moon_position(&self) -> Vec3 {
        self.orbit.moon_position()
    }

    pub fn sun_position(&self) -> Vec3 {
        Vec3::from_array(self.layout.sun_position)
    }

    pub fn layout(&self) -> &SceneLayout {
        &self.layout
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Angle between the Earth–Moon and Earth–Sun lines (degrees)
    pub fn sun_moon_angle(&self) -> f32 {
        self.moon_position()
            .angle_between(self.sun_position())
            .to_degrees()
    }

    /// Current mesh; cheap to clone, never partially built
    pub fn mesh(&self) -> Arc<TidalMesh> {
        Arc::clone(&self.mesh)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn readout(&self) -> TideReadout {
        let real_world = real_world_height_m(self.tide_height);
        TideReadout {
            tide_type: self.tide_type,
            tide_height: self.tide_height,
            real_world_height_m: real_world,
            moon_orbit_angle: self.moon_orbit_angle(),
            moon_distance: self.moon_distance(),
            moon_position: self.moon_position(),
            sun_moon_angle: self.sun_moon_angle(),
            comparison: comparison_for(real_world),
            fact: fact_for_height(real_world),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tide::MAX_TIDE_HEIGHT;

    fn small_sim(kind: TideModelKind) -> TideSimulation {
        let mesh = MeshParams {
            tessellation: 16,
            ..MeshParams::default()
        };
        TideSimulation::new(&OrbitParams::default(), mesh, kind.build())
    }

    #[test]
    fn test_initial_state() {
        let sim = small_sim(TideModelKind::Preset);
        assert_eq!(sim.tide_type(), TideType::Normal);
        assert_eq!(sim.moon_orbit_angle(), 0.0);
        assert_eq!(sim.moon_distance(), 1.5);
        assert_eq!(sim.tide_height(), 0.15);
        assert_eq!(sim.revision(), 1);
        assert_eq!(sim.mesh().vertex_count(), 17 * 17);
    }

    #[test]
    fn test_tide_type_presets_applied() {
        let mut sim = small_sim(TideModelKind::Preset);

        sim.set_tide_type(TideType::Spring);
        assert_eq!((sim.moon_orbit_angle(), sim.moon_distance()), (0.0, 1.5));

        sim.set_tide_type(TideType::Neap);
        assert_eq!((sim.moon_orbit_angle(), sim.moon_distance()), (90.0, 1.5));

        sim.set_tide_type(TideType::Low);
        assert_eq!((sim.moon_orbit_angle(), sim.moon_distance()), (45.0, 3.0));
        assert_eq!(sim.tide_height(), 0.05);

        sim.set_tide_type(TideType::Normal);
        assert_eq!((sim.moon_orbit_angle(), sim.moon_distance()), (45.0, 1.5));
    }

    #[test]
    fn test_zero_step_is_idempotent() {
        let mut sim = small_sim(TideModelKind::Gravitational);
        sim.set_tide_type(TideType::Spring);
        sim.step_orbit(12.5);

        let height = sim.tide_height();
        let position = sim.moon_position();
        let mesh = sim.mesh();

        for _ in 0..3 {
            sim.step_orbit(0.0);
        }
        assert_eq!(sim.tide_height(), height);
        assert_eq!(sim.moon_position(), position);
        assert_eq!(*sim.mesh(), *mesh);
    }

    #[test]
    fn test_full_turn_matches_zero_step() {
        let mut full = small_sim(TideModelKind::Preset);
        let mut zero = small_sim(TideModelKind::Preset);
        full.set_moon_orbit_angle(33.0);
        zero.set_moon_orbit_angle(33.0);

        full.step_orbit(360.0);
        zero.step_orbit(0.0);
        assert!(full.moon_position().distance(zero.moon_position()) < 1e-5);
    }

    #[test]
    fn test_slider_inputs_clamped() {
        let mut sim = small_sim(TideModelKind::Preset);
        sim.set_moon_distance(10.0);
        assert_eq!(sim.moon_distance(), 4.0);
        sim.set_moon_distance(0.0);
        assert_eq!(sim.moon_distance(), 1.0);

        sim.set_moon_orbit_angle(-45.0);
        assert_eq!(sim.moon_orbit_angle(), 315.0);
        sim.set_moon_orbit_angle(720.0);
        assert_eq!(sim.moon_orbit_angle(), 0.0);
    }

    #[test]
    fn test_non_finite_inputs_ignored() {
        let mut sim = small_sim(TideModelKind::Preset);
        let revision = sim.revision();
        sim.set_moon_distance(f32::NAN);
        sim.set_moon_orbit_angle(f32::INFINITY);
        sim.step_orbit(f32::NAN);
        assert_eq!(sim.revision(), revision);
        assert_eq!(sim.moon_distance(), 1.5);
    }

    #[test]
    fn test_every_setter_rebuilds_mesh() {
        let mut sim = small_sim(TideModelKind::Preset);
        let start = sim.revision();
        sim.set_tide_type(TideType::Spring);
        sim.step_orbit(1.0);
        sim.set_moon_distance(2.0);
        sim.set_moon_orbit_angle(10.0);
        sim.update_moon_position();
        assert_eq!(sim.revision(), start + 5);
    }

    #[test]
    fn test_spring_scenario_end_to_end() {
        for kind in [TideModelKind::Preset, TideModelKind::Gravitational] {
            let mut sim = small_sim(kind);
            sim.set_tide_type(TideType::Spring);
            sim.set_moon_distance(1.5);
            sim.set_moon_orbit_angle(0.0);

            assert!((sim.tide_height() - 0.2).abs() < 1e-5);
            assert!(sim.moon_position().distance(Vec3::new(1.5, 0.0, 0.0)) < 1e-6);

            // Bulge maxima sit on the X axis
            let mesh = sim.mesh();
            let peak = mesh
                .positions
                .iter()
                .max_by(|a, b| a.length().partial_cmp(&b.length()).unwrap())
                .unwrap();
            assert!(peak.normalize().x.abs() > 0.99);
        }
    }

    #[test]
    fn test_gravitational_height_tracks_distance() {
        let mut sim = small_sim(TideModelKind::Gravitational);
        sim.set_tide_type(TideType::Normal);
        let near = sim.tide_height();
        sim.set_moon_distance(4.0);
        let far = sim.tide_height();
        assert!(far < near);
        assert!((0.0..=MAX_TIDE_HEIGHT).contains(&far));
    }

    #[test]
    fn test_readout() {
        let mut sim = small_sim(TideModelKind::Preset);
        sim.set_tide_type(TideType::Neap);
        let readout = sim.readout();

        assert_eq!(readout.tide_type, TideType::Neap);
        assert!((readout.real_world_height_m - 1.6).abs() < 1e-5);
        assert!((readout.sun_moon_angle - 90.0).abs() < 1e-3);
        assert_eq!(readout.comparison.place, "Mediterranean Sea");
        assert!(readout.fact.contains("intertidal"));
    }

    #[test]
    fn test_model_swap_recomputes() {
        let mut sim = small_sim(TideModelKind::Preset);
        sim.set_tide_type(TideType::Low);
        assert_eq!(sim.tide_height(), 0.05);

        sim.set_model(TideModelKind::Gravitational.build());
        assert_eq!(sim.model_name(), "gravitational");
        assert!(sim.tide_height() >= 0.05);
    }
}
