//! Shared types used by the terrain and particle cores.

mod types;

pub use types::{Bounds2, Color, ParticleId};
