//! Tidewave library - Earth tide visualization core
//!
//! Procedural tidal-bulge ocean mesh driven by the Moon's orbit and a tide type.

pub mod animation;
pub mod cli;
pub mod controller;
pub mod ocean;
pub mod orbit;
pub mod params;
pub mod preview;
pub mod simulation;
pub mod tide;

pub use controller::{MeshReader, TideController};
pub use ocean::TidalMesh;
pub use tide::TideType;
