use std::f32::consts::PI;

use demoscape_common::{Color, ParticleId};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Density used to derive mass from radius.
pub const DEFAULT_DENSITY: f32 = 0.5;

/// A ball bouncing inside the chamber.
///
/// Radius, mass and color are fixed at creation. Position and velocity are
/// only changed by the integrator, and never again once `settled` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    id: ParticleId,
    pub(crate) position: Vec3,
    pub(crate) velocity: Vec3,
    radius: f32,
    mass: f32,
    color: Color,
    pub(crate) settled: bool,
}

impl Particle {
    /// Create a particle with mass derived from [`DEFAULT_DENSITY`].
    pub fn new(position: Vec3, velocity: Vec3, radius: f32, color: Color) -> Self {
        Self::with_density(position, velocity, radius, color, DEFAULT_DENSITY)
    }

    /// Create a particle whose mass is `density · 4/3 · π · r³`.
    pub fn with_density(
        position: Vec3,
        velocity: Vec3,
        radius: f32,
        color: Color,
        density: f32,
    ) -> Self {
        Self {
            id: ParticleId::new(),
            position,
            velocity,
            radius,
            mass: density * sphere_volume(radius),
            color,
            settled: false,
        }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// True once the particle has come to rest on the floor.
    pub fn is_settled(&self) -> bool {
        self.settled
    }
}

fn sphere_volume(radius: f32) -> f32 {
    4.0 / 3.0 * PI * radius.powi(3)
}
