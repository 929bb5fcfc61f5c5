//! Controller owning the shared simulation and its orbit animation.
//!
//! This is the interface the presentation layer drives. The simulation sits behind a
//! mutex; the ticker thread and UI setters both go through it, so every recompute
//! happens under the lock and a mesh is swapped in whole.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;

use crate::animation::Ticker;
use crate::ocean::TidalMesh;
use crate::params::{ConfigError, MeshParams, OrbitParams, SceneLayout};
use crate::simulation::{TideReadout, TideSimulation};
use crate::tide::{TideModelKind, TideType};

/// Lock the simulation; a panic in another holder does not invalidate the state
fn lock(simulation: &Mutex<TideSimulation>) -> MutexGuard<'_, TideSimulation> {
    simulation.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct TideController {
    simulation: Arc<Mutex<TideSimulation>>,
    ticker: Ticker,
    orbit: OrbitParams,
}

/// Read-only view for a render thread
///
/// Each call takes the lock only long enough to clone out the result, so a reader
/// can never hold the simulation across `stop_animation`.
#[derive(Clone)]
pub struct MeshReader {
    simulation: Arc<Mutex<TideSimulation>>,
}

impl MeshReader {
    /// Latest complete mesh
    pub fn mesh(&self) -> Arc<TidalMesh> {
        lock(&self.simulation).mesh()
    }

    pub fn readout(&self) -> TideReadout {
        lock(&self.simulation).readout()
    }
}

impl TideController {
    /// Build the controller, rejecting parameters that would panic later
    /// (zero tessellation, zero or non-finite tick rate)
    pub fn new(
        orbit: OrbitParams,
        mesh: MeshParams,
        model: TideModelKind,
    ) -> Result<Self, ConfigError> {
        orbit.validate()?;
        mesh.validate()?;

        let simulation = TideSimulation::new(&orbit, mesh, model.build());
        Ok(Self {
            simulation: Arc::new(Mutex::new(simulation)),
            ticker: Ticker::new(),
            orbit,
        })
    }

    fn lock(&self) -> MutexGuard<'_, TideSimulation> {
        lock(&self.simulation)
    }

    /// Read-only handle for a render thread
    pub fn reader(&self) -> MeshReader {
        MeshReader {
            simulation: Arc::clone(&self.simulation),
        }
    }

    /// Stop the orbit animation, then apply the tide type's preset
    pub fn set_tide_type(&mut self, tide_type: TideType) {
        self.stop_animation();
        self.lock().set_tide_type(tide_type);
    }

    pub fn set_moon_distance(&self, distance: f32) {
        self.lock().set_moon_distance(distance);
    }

    pub fn set_moon_orbit_angle(&self, angle_degrees: f32) {
        self.lock().set_moon_orbit_angle(angle_degrees);
    }

    pub fn step_orbit(&self, delta_degrees: f32) {
        self.lock().step_orbit(delta_degrees);
    }

    /// Force an immediate recompute and mesh rebuild
    pub fn update_moon_position(&self) {
        self.lock().update_moon_position();
    }

    pub fn set_tide_model(&self, model: TideModelKind) {
        self.lock().set_model(model.build());
    }

    /// Start advancing the orbit at the configured cadence; no-op while running
    pub fn start_animation(&mut self) {
        let simulation = Arc::clone(&self.simulation);
        let step = self.orbit.step_degrees;

        let started = self.ticker.start(self.orbit.tick_interval(), move || {
            lock(&simulation).step_orbit(step);
        });

        if started {
            info!(
                "Orbit animation started ({}° per tick, {} Hz)",
                step, self.orbit.ticks_per_second
            );
        }
    }

    /// Stop the orbit animation; safe in any state
    pub fn stop_animation(&mut self) {
        if self.ticker.is_running() {
            info!("Orbit animation stopped");
        }
        self.ticker.stop();
    }

    pub fn is_animating(&self) -> bool {
        self.ticker.is_running()
    }

    /// Number of live animation loops (0 or 1)
    pub fn animation_loops(&self) -> usize {
        self.ticker.active_loops()
    }

    pub fn tide_type(&self) -> TideType {
        self.lock().tide_type()
    }

    pub fn tide_height(&self) -> f32 {
        self.lock().tide_height()
    }

    pub fn moon_orbit_angle(&self) -> f32 {
        self.lock().moon_orbit_angle()
    }

    pub fn moon_distance(&self) -> f32 {
        self.lock().moon_distance()
    }

    /// Latest complete mesh
    pub fn mesh(&self) -> Arc<TidalMesh> {
        self.lock().mesh()
    }

    pub fn readout(&self) -> TideReadout {
        self.lock().readout()
    }

    pub fn layout(&self) -> SceneLayout {
        self.lock().layout().clone()
    }
}
