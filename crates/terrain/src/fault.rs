use std::f32::consts::TAU;

use demoscape_common::Bounds2;
use glam::Vec2;
use rand::Rng;

use crate::mesh::Mesh;

/// A fault line through `point`, perpendicular to the unit `normal`.
///
/// Vertices on the side `normal` points to are raised, the others lowered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaultLine {
    pub point: Vec2,
    pub normal: Vec2,
}

impl FaultLine {
    /// Fault line through `point` whose normal makes angle `theta` with +X.
    pub fn from_angle(point: Vec2, theta: f32) -> Self {
        Self {
            point,
            normal: Vec2::from_angle(theta),
        }
    }

    /// Random point in `bounds` and random direction in `[0, 2π)`.
    pub fn random<R: Rng + ?Sized>(bounds: Bounds2, rng: &mut R) -> Self {
        let point = Vec2::new(
            bounds.min_x + rng.random::<f32>() * bounds.width(),
            bounds.min_y + rng.random::<f32>() * bounds.height(),
        );
        let theta = rng.random::<f32>() * TAU;
        Self::from_angle(point, theta)
    }

    /// Unit direction along the line: the normal rotated by -90°.
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.normal.y, -self.normal.x)
    }

    /// `+1` on the normal's side of the line, `-1` on the other.
    /// Points exactly on the line count as positive.
    pub fn side(&self, p: Vec2) -> f32 {
        if (p - self.point).dot(self.normal) >= 0.0 {
            1.0
        } else {
            -1.0
        }
    }

    /// Perpendicular distance from `p` to the line.
    pub fn distance(&self, p: Vec2) -> f32 {
        (p - self.point).perp_dot(self.direction()).abs()
    }

    /// Height change this fault applies at `p`, or `0.0` beyond `radius`.
    pub fn displacement(&self, p: Vec2, delta: f32, radius: f32) -> f32 {
        let dist = self.distance(p);
        if dist > radius {
            return 0.0;
        }
        delta * self.side(p) * falloff(dist, radius)
    }
}

/// Smooth bump `(1 - (d/r)²)²`: 1 on the line, 0 at distance `r`.
pub fn falloff(dist: f32, radius: f32) -> f32 {
    let t = dist / radius;
    let s = 1.0 - t * t;
    s * s
}

/// Displace every vertex of `mesh` by one fault.
pub fn apply_fault(mesh: &mut Mesh, fault: &FaultLine, delta: f32, radius: f32) {
    for v in mesh.vertices_mut() {
        v.z += fault.displacement(v.truncate(), delta, radius);
    }
}

/// Run `count` fault passes, shrinking `delta` by `2^decay` after each one.
pub(crate) fn shape_terrain<R: Rng + ?Sized>(
    mesh: &mut Mesh,
    count: u32,
    initial_delta: f32,
    decay: f32,
    radius: f32,
    rng: &mut R,
) {
    let bounds = mesh.bounds();
    let shrink = 2f32.powf(decay);
    let mut delta = initial_delta;
    for i in 0..count {
        let fault = FaultLine::random(bounds, rng);
        tracing::trace!(i, ?fault, delta, "applying fault");
        apply_fault(mesh, &fault, delta, radius);
        delta /= shrink;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_grid;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const EPS: f32 = 1e-6;

    #[test]
    fn direction_is_normal_rotated_clockwise() {
        let f = FaultLine::from_angle(Vec2::ZERO, 0.0);
        assert!((f.direction() - Vec2::new(0.0, -1.0)).length() < EPS);
    }

    #[test]
    fn distance_is_perpendicular_to_line() {
        // Line x = 1 (normal +X through (1, 0)).
        let f = FaultLine {
            point: Vec2::new(1.0, 0.0),
            normal: Vec2::X,
        };
        assert!((f.distance(Vec2::new(3.0, 7.0)) - 2.0).abs() < EPS);
        assert!((f.distance(Vec2::new(0.5, -4.0)) - 0.5).abs() < EPS);
        assert_eq!(f.side(Vec2::new(3.0, 0.0)), 1.0);
        assert_eq!(f.side(Vec2::new(0.0, 0.0)), -1.0);
    }

    #[test]
    fn point_on_line_counts_as_positive() {
        let f = FaultLine {
            point: Vec2::new(1.0, 0.0),
            normal: Vec2::X,
        };
        assert_eq!(f.side(Vec2::new(1.0, 5.0)), 1.0);
        assert_eq!(f.displacement(Vec2::new(1.0, 5.0), 0.5, 2.0), 0.5);
    }

    #[test]
    fn falloff_shape() {
        assert_eq!(falloff(0.0, 2.0), 1.0);
        assert_eq!(falloff(2.0, 2.0), 0.0);
        assert!((falloff(1.0, 2.0) - 0.5625).abs() < EPS);
    }

    #[test]
    fn displacement_zero_beyond_radius() {
        let f = FaultLine {
            point: Vec2::ZERO,
            normal: Vec2::Y,
        };
        assert_eq!(f.displacement(Vec2::new(0.0, 2.5), 1.0, 2.0), 0.0);
        assert_eq!(f.displacement(Vec2::new(10.0, -3.0), 1.0, 2.0), 0.0);
        assert!(f.displacement(Vec2::new(0.0, -1.0), 1.0, 2.0) < 0.0);
    }

    #[test]
    fn apply_fault_leaves_far_vertices_alone() {
        let mut mesh = build_grid(10, Bounds2::centered(10.0)).unwrap();
        let fault = FaultLine {
            point: Vec2::new(-10.0, 0.0),
            normal: Vec2::X,
        };
        apply_fault(&mut mesh, &fault, 1.0, 2.0);
        for v in mesh.vertices() {
            if (v.x + 10.0).abs() > 2.0 {
                assert_eq!(v.z, 0.0, "vertex {v:?} should be untouched");
            }
        }
        // The column on the line is raised by the full delta.
        assert_eq!(mesh.vertex_at(5, 0).unwrap().z, 1.0);
    }

    #[test]
    fn random_faults_stay_in_bounds_with_unit_normals() {
        let bounds = Bounds2::new(-3.0, 5.0, 1.0, 2.0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let f = FaultLine::random(bounds, &mut rng);
            assert!(bounds.contains(f.point));
            assert!((f.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn shaping_is_reproducible_per_seed() {
        let base = build_grid(16, Bounds2::centered(4.0)).unwrap();
        let mut a = base.clone();
        let mut b = base.clone();
        let mut rng_a = ChaCha8Rng::seed_from_u64(3);
        let mut rng_b = ChaCha8Rng::seed_from_u64(3);
        shape_terrain(&mut a, 50, 0.1, 0.01, 2.0, &mut rng_a);
        shape_terrain(&mut b, 50, 0.1, 0.01, 2.0, &mut rng_b);
        assert_eq!(a.vertices(), b.vertices());
        assert!(a.vertices().iter().any(|v| v.z != 0.0));
    }

    #[test]
    fn zero_faults_keep_grid_flat() {
        let mut mesh = build_grid(4, Bounds2::centered(1.0)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        shape_terrain(&mut mesh, 0, 1.0, 1.0, 2.0, &mut rng);
        assert!(mesh.vertices().iter().all(|v| v.z == 0.0));
    }
}
