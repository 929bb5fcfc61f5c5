//! Tidewave - Earth tide visualization driver
//!
//! Runs the tide simulation headless: pick a tide type, move the Moon, let the
//! orbit animate, and inspect the resulting ocean mesh.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tidewave::cli::Args;
use tidewave::preview::save_snapshot;
use tidewave::TideController;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mesh_params = args.mesh_params();
    let orbit_params = args.orbit_params();
    let snapshot = args.snapshot_config();
    if let Some(config) = &snapshot {
        config.validate().context("Invalid snapshot settings")?;
    }

    println!("Tidewave - Earth tide visualization");
    println!("Initializing simulation...\n");

    let step = orbit_params.step_degrees;
    let mut controller = TideController::new(orbit_params, mesh_params, args.parse_tide_model())
        .context("Invalid simulation parameters")?;
    controller.set_tide_type(args.parse_tide_type());

    if let Some(distance) = args.distance {
        controller.set_moon_distance(distance);
    }
    if let Some(angle) = args.angle {
        controller.set_moon_orbit_angle(angle);
    }

    if args.steps > 0 {
        info!("Stepping orbit {} ticks", args.steps);
        for _ in 0..args.steps {
            controller.step_orbit(step);
        }
    }

    if let Some(seconds) = args.animate.filter(|s| s.is_finite()) {
        controller.start_animation();
        thread::sleep(Duration::from_secs_f32(seconds.max(0.0)));
        controller.stop_animation();
    }

    let readout = controller.readout();
    let mesh = controller.mesh();

    println!("{}", readout.tide_type);
    println!("  {}", readout.tide_type.info().description);
    println!("  Formula: {}", readout.tide_type.info().formula);
    println!(
        "Tide height: {:.3} units ({:.1} meters)",
        readout.tide_height, readout.real_world_height_m
    );
    println!("Orbit position: {:.1}°", readout.moon_orbit_angle);
    println!("Moon distance: {:.1}×", readout.moon_distance);
    println!("Sun-Moon angle: {:.1}°", readout.sun_moon_angle);
    println!(
        "Comparable to: {} ({:.1} m)",
        readout.comparison.place, readout.comparison.height_m
    );
    println!("Did you know? {}", readout.fact);
    println!(
        "Ocean mesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    if let Some(config) = snapshot {
        save_snapshot(&mesh, readout.moon_position, &controller.layout(), &config)
            .with_context(|| format!("Failed to write snapshot to {}", config.output_path))?;
        println!("Snapshot written to {}", config.output_path);
    }

    Ok(())
}
