//! Rendering adapter: flat buffers and a renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read terrain, particles and the flight view; they never
//!   mutate simulation state.
//! - Buffer layouts are fixed: `f32` triples for positions and normals,
//!   `u32` indices, 0-based.

mod buffers;
mod error;
mod export;
mod instance;
mod renderer;

pub use buffers::MeshBuffers;
pub use error::RenderError;
pub use export::{FrameExport, read_json, write_json};
pub use instance::{ParticleInstance, particle_instances};
pub use renderer::{DebugTextRenderer, Frame, RenderView, Renderer};
