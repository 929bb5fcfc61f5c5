//! Command-line argument parsing.

use clap::Parser;
use log::warn;

use crate::params::{MeshParams, OrbitParams, SnapshotConfig};
use crate::tide::{TideModelKind, TideType};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Tidewave")]
#[command(about = "Earth tide visualization core: tidal bulge mesh and orbit driver", long_about = None)]
pub struct Args {
    /// Tide type: normal (default), spring, neap, low
    #[arg(long, value_name = "TYPE", default_value = "normal")]
    pub tide_type: String,

    /// Tide height model: preset (default) or gravitational
    #[arg(long, value_name = "MODEL", default_value = "preset")]
    pub tide_model: String,

    /// Moon distance override (multiples of the reference distance, 1.0-4.0)
    #[arg(long, value_name = "FACTOR")]
    pub distance: Option<f32>,

    /// Moon orbit angle override (degrees)
    #[arg(long, value_name = "DEGREES")]
    pub angle: Option<f32>,

    /// Latitude/longitude segment count
    #[arg(long, value_name = "SEGMENTS")]
    pub tessellation: Option<u32>,

    /// Use the reduced tessellation for constrained devices
    #[arg(long)]
    pub low_detail: bool,

    /// Advance the orbit by this many animation ticks, deterministically
    #[arg(long, value_name = "TICKS", default_value = "0")]
    pub steps: u32,

    /// Run the real-time orbit animation for this long (seconds)
    #[arg(long, value_name = "SECONDS")]
    pub animate: Option<f32>,

    /// Write a top-down PNG snapshot of the ocean mesh
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<String>,

    /// Snapshot edge length (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "512")]
    pub snapshot_size: u32,
}

impl Args {
    /// Parse tide type, falling back to normal
    pub fn parse_tide_type(&self) -> TideType {
        TideType::from_name(&self.tide_type).unwrap_or_else(|| {
            warn!("Unknown tide type '{}', using normal", self.tide_type);
            TideType::Normal
        })
    }

    /// Parse tide model, falling back to the preset model
    pub fn parse_tide_model(&self) -> TideModelKind {
        TideModelKind::from_name(&self.tide_model).unwrap_or_else(|| {
            warn!("Unknown tide model '{}', using preset", self.tide_model);
            TideModelKind::Preset
        })
    }

    pub fn mesh_params(&self) -> MeshParams {
        let mut params = if self.low_detail {
            MeshParams::low_detail()
        } else {
            MeshParams::default()
        };
        if let Some(tessellation) = self.tessellation {
            params.tessellation = tessellation;
        }
        params
    }

    pub fn orbit_params(&self) -> OrbitParams {
        OrbitParams::default()
    }

    /// Snapshot configuration if a snapshot path was given
    pub fn snapshot_config(&self) -> Option<SnapshotConfig> {
        self.snapshot
            .as_ref()
            .map(|path| SnapshotConfig::new(path.clone(), self.snapshot_size))
    }
}
