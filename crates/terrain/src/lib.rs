//! Terrain synthesis: a triangulated grid shaped by repeated random fault
//! displacement, with per-vertex normals for lighting.
//!
//! # Invariants
//! - `normals.len() == vertices.len()` for every mesh.
//! - Every face and edge index is below the vertex count.
//! - Any height mutation bumps the mesh generation, so cached elevation
//!   extrema never go stale.

mod config;
mod extrema;
mod fault;
mod generator;
mod grid;
mod mesh;
mod normals;

pub use config::TerrainConfig;
pub use extrema::{ElevationCache, Extrema};
pub use fault::{FaultLine, apply_fault, falloff};
pub use generator::{generate, generate_seeded};
pub use grid::{build_grid, edges_from_faces};
pub use mesh::{MAX_DIVISIONS, Mesh, TerrainError};
pub use normals::{accumulate_normal, calculate_normals, face_normal};
