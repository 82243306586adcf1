use glam::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a particle in a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticleId(pub Uuid);

impl ParticleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First eight hex digits, for log lines and debug output.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for ParticleId {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Axis-aligned rectangle in the XY plane, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds2 {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Bounds2 {
    pub const fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Square centered on the origin with the given half side length.
    pub const fn centered(half: f32) -> Self {
        Self::new(-half, half, -half, half)
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.min_x, self.min_y)
    }

    /// True when all edges are finite and each minimum is strictly below its maximum.
    pub fn is_valid(&self) -> bool {
        [self.min_x, self.max_x, self.min_y, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.min_x < self.max_x
            && self.min_y < self.max_y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

impl Default for Bounds2 {
    fn default() -> Self {
        Self::centered(20.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_id_uniqueness() {
        let a = ParticleId::new();
        let b = ParticleId::new();
        assert_ne!(a, b);
        assert_eq!(a.short().len(), 8);
    }

    #[test]
    fn bounds_validity() {
        assert!(Bounds2::centered(1.0).is_valid());
        assert!(!Bounds2::new(1.0, 1.0, 0.0, 2.0).is_valid());
        assert!(!Bounds2::new(0.0, f32::NAN, 0.0, 2.0).is_valid());
        assert!(!Bounds2::new(0.0, 1.0, 3.0, 2.0).is_valid());
    }

    #[test]
    fn bounds_extent_and_contains() {
        let b = Bounds2::new(-1.0, 3.0, 0.0, 2.0);
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 2.0);
        assert_eq!(b.min(), Vec2::new(-1.0, 0.0));
        assert!(b.contains(Vec2::new(3.0, 2.0)));
        assert!(!b.contains(Vec2::new(3.1, 1.0)));
    }

    #[test]
    fn color_default_is_white() {
        assert_eq!(Color::default().to_array(), [1.0, 1.0, 1.0]);
    }
}
