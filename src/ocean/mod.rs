//! Tidal ocean surface: pure mesh generation plus the shell builder.

pub mod mesh;
mod system;

pub use mesh::{generate, generate_with_shape, BulgeShape, TidalMesh, Vertex};
pub use system::OceanSystem;
