//! Particle integration: forces, analytic time of impact against the chamber
//! walls, reflection with absorption, and settling on the floor.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::particle::Particle;

/// Integration constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    /// Constant acceleration applied before drag.
    pub gravity: Vec3,
    /// Fraction of velocity kept after one second: `v *= drag^dt`.
    pub drag: f32,
    /// Speed kept after a wall bounce.
    pub restitution: f32,
    /// Below this post-bounce speed a floor contact settles the particle.
    pub settle_speed: f32,
    /// Wall impacts resolved per step. `1` resolves only the earliest one and
    /// lets the remainder of the step fly free.
    pub max_collisions_per_step: u32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.8, 0.0),
            drag: 0.6,
            restitution: 0.9,
            settle_speed: 0.01,
            max_collisions_per_step: 1,
        }
    }
}

impl PhysicsParams {
    /// No gravity and no drag; only collisions change velocity.
    pub fn ballistic() -> Self {
        Self {
            gravity: Vec3::ZERO,
            drag: 1.0,
            ..Self::default()
        }
    }
}

/// One of the six chamber walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wall {
    /// `x = -bound`
    Left,
    /// `x = +bound`
    Right,
    /// `y = -bound`
    Floor,
    /// `y = +bound`
    Ceiling,
    /// `z = -bound`
    Back,
    /// `z = +bound`
    Front,
}

impl Wall {
    fn from_axis(axis: usize, min_side: bool) -> Self {
        match (axis, min_side) {
            (0, true) => Self::Left,
            (0, false) => Self::Right,
            (1, true) => Self::Floor,
            (1, false) => Self::Ceiling,
            (_, true) => Self::Back,
            (_, false) => Self::Front,
        }
    }

    /// Unit normal pointing into the chamber.
    pub fn normal(self) -> Vec3 {
        match self {
            Self::Left => Vec3::X,
            Self::Right => Vec3::NEG_X,
            Self::Floor => Vec3::Y,
            Self::Ceiling => Vec3::NEG_Y,
            Self::Back => Vec3::Z,
            Self::Front => Vec3::NEG_Z,
        }
    }

    pub fn is_floor(self) -> bool {
        self == Self::Floor
    }
}

/// Earliest wall contact within a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    pub wall: Wall,
    /// Seconds from the start of the interval, in `[0, dt]`.
    pub time: f32,
}

/// Details of a step that touched at least one wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionReport {
    pub first: Impact,
    pub impacts: u32,
    /// Speed right before the first bounce.
    pub incoming_speed: f32,
    /// Speed after the last bounce.
    pub outgoing_speed: f32,
    pub settled: bool,
}

/// What a call to [`step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Particle was already settled; nothing changed.
    Frozen,
    /// `dt` was zero, negative or not finite; nothing changed.
    Skipped,
    /// Moved without touching a wall.
    Free,
    Collided(CollisionReport),
}

impl StepOutcome {
    pub fn collided(&self) -> bool {
        matches!(self, Self::Collided(_))
    }

    pub fn settled(&self) -> bool {
        matches!(self, Self::Collided(r) if r.settled)
    }
}

/// Mirror `v` about the plane with unit normal `n`.
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Find the earliest wall a sphere at `position` moving with `velocity`
/// reaches within `dt`, for a chamber spanning `[-bound, bound]` per axis.
///
/// An axis only counts when the proposed end position pokes through the wall
/// and the velocity points at it, so a zero velocity component never
/// contributes. The impact time comes from the start position and is clamped
/// to `[0, dt]`. Ties keep the lowest axis.
pub fn detect_impact(
    position: Vec3,
    velocity: Vec3,
    radius: f32,
    bound: f32,
    dt: f32,
) -> Option<Impact> {
    let proposed = position + velocity * dt;
    let limit = bound - radius;
    let mut best: Option<Impact> = None;

    for axis in 0..3 {
        let v = velocity[axis];
        let p = proposed[axis];
        let (plane, min_side) = if v < 0.0 && p - radius < -bound {
            (-limit, true)
        } else if v > 0.0 && p + radius > bound {
            (limit, false)
        } else {
            continue;
        };

        let time = ((plane - position[axis]) / v).clamp(0.0, dt);
        if best.is_none_or(|b| time < b.time) {
            best = Some(Impact {
                wall: Wall::from_axis(axis, min_side),
                time,
            });
        }
    }
    best
}

/// Advance `particle` by `dt` seconds inside a chamber of half extent `bound`.
///
/// Gravity is applied first, then drag scales the result. The particle then
/// flies to its earliest wall contact, bounces with `restitution`, and covers
/// the rest of the interval with the reflected velocity. Up to
/// `max_collisions_per_step` contacts are resolved this way. A floor bounce
/// slower than `settle_speed` freezes the particle for good.
pub fn step(particle: &mut Particle, dt: f32, bound: f32, params: &PhysicsParams) -> StepOutcome {
    if particle.settled {
        return StepOutcome::Frozen;
    }
    if !dt.is_finite() || dt <= 0.0 {
        return StepOutcome::Skipped;
    }

    let radius = particle.radius();
    let mut velocity = (particle.velocity + params.gravity * dt) * params.drag.powf(dt);
    let mut position = particle.position;
    let mut remaining = dt;
    let max_impacts = params.max_collisions_per_step.max(1);
    let incoming_speed = velocity.length();
    let mut first: Option<Impact> = None;
    let mut impacts = 0;
    let mut settled = false;

    while impacts < max_impacts {
        let Some(impact) = detect_impact(position, velocity, radius, bound, remaining) else {
            break;
        };
        position += velocity * impact.time;
        velocity = reflect(velocity, impact.wall.normal()) * params.restitution;
        remaining -= impact.time;
        impacts += 1;
        if first.is_none() {
            first = Some(impact);
        }

        if impact.wall.is_floor() && velocity.length() < params.settle_speed {
            settled = true;
            break;
        }
    }
    position += velocity * remaining;

    particle.position = position;
    particle.velocity = velocity;
    particle.settled = settled;

    match first {
        None => StepOutcome::Free,
        Some(first) => {
            if settled {
                tracing::debug!(id = %particle.id().short(), ?position, "particle settled");
            }
            StepOutcome::Collided(CollisionReport {
                first,
                impacts,
                incoming_speed,
                outgoing_speed: velocity.length(),
                settled,
            })
        }
    }
}
