use demoscape_common::Bounds2;
use serde::{Deserialize, Serialize};

use crate::mesh::{MAX_DIVISIONS, TerrainError};

/// Terrain generation parameters.
///
/// Defaults reproduce the flight-sim terrain: a 256×256 grid over
/// `[-20, 20]²` shaped by 200 faults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid cells along each axis.
    pub divisions: u32,
    pub bounds: Bounds2,
    /// Number of fault passes.
    pub faults: u32,
    /// Height change of the first fault pass.
    pub initial_delta: f32,
    /// Each pass divides delta by `2^decay`.
    pub decay: f32,
    /// Vertices farther than this from a fault line are not displaced.
    pub falloff_radius: f32,
    /// Seed for [`crate::generate_seeded`].
    pub seed: u64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            divisions: 256,
            bounds: Bounds2::centered(20.0),
            faults: 200,
            initial_delta: 0.025,
            decay: 0.005,
            falloff_radius: 2.0,
            seed: 0,
        }
    }
}

impl TerrainConfig {
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.divisions == 0 || self.divisions > MAX_DIVISIONS {
            return Err(TerrainError::InvalidDivisions {
                divisions: self.divisions,
                max: MAX_DIVISIONS,
            });
        }
        if !self.bounds.is_valid() {
            let b = self.bounds;
            return Err(TerrainError::InvalidBounds {
                min_x: b.min_x,
                max_x: b.max_x,
                min_y: b.min_y,
                max_y: b.max_y,
            });
        }
        if !self.initial_delta.is_finite() {
            return Err(TerrainError::InvalidFaultParameter {
                name: "initial_delta",
                value: self.initial_delta,
            });
        }
        if !self.decay.is_finite() || self.decay < 0.0 {
            return Err(TerrainError::InvalidFaultParameter {
                name: "decay",
                value: self.decay,
            });
        }
        if !self.falloff_radius.is_finite() || self.falloff_radius <= 0.0 {
            return Err(TerrainError::InvalidFaultParameter {
                name: "falloff_radius",
                value: self.falloff_radius,
            });
        }
        Ok(())
    }
}
