use serde::{Deserialize, Serialize};

use crate::mesh::Mesh;

/// Lowest and highest vertex height of a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extrema {
    pub min_z: f32,
    pub max_z: f32,
}

impl Extrema {
    /// Scan every vertex. `None` for a mesh without vertices.
    pub fn scan(mesh: &Mesh) -> Option<Self> {
        let mut iter = mesh.vertices().iter().map(|v| v.z);
        let first = iter.next()?;
        let (min_z, max_z) = iter.fold((first, first), |(lo, hi), z| (lo.min(z), hi.max(z)));
        Some(Self { min_z, max_z })
    }

    pub fn span(&self) -> f32 {
        self.max_z - self.min_z
    }
}

/// Opt-in memo of [`Extrema`] keyed by [`Mesh::generation`].
///
/// Any height mutation bumps the generation, so a lookup after
/// regeneration or editing rescans instead of returning stale values.
#[derive(Debug, Clone, Default)]
pub struct ElevationCache {
    cached: Option<(u64, Extrema)>,
    scans: u64,
}

impl ElevationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, mesh: &Mesh) -> Option<Extrema> {
        if let Some((generation, extrema)) = self.cached {
            if generation == mesh.generation() {
                return Some(extrema);
            }
        }
        let extrema = Extrema::scan(mesh)?;
        self.scans += 1;
        tracing::trace!(generation = mesh.generation(), ?extrema, "elevation rescanned");
        self.cached = Some((mesh.generation(), extrema));
        Some(extrema)
    }

    pub fn min_z(&mut self, mesh: &Mesh) -> Option<f32> {
        self.get(mesh).map(|e| e.min_z)
    }

    pub fn max_z(&mut self, mesh: &Mesh) -> Option<f32> {
        self.get(mesh).map(|e| e.max_z)
    }

    /// Number of full scans performed so far.
    pub fn scans(&self) -> u64 {
        self.scans
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_grid;
    use demoscape_common::Bounds2;
    use glam::Vec3;

    fn bumpy() -> Mesh {
        let mut mesh = build_grid(2, Bounds2::centered(1.0)).unwrap();
        mesh.set_vertex(0, Vec3::new(-1.0, -1.0, -0.5)).unwrap();
        mesh.set_vertex(8, Vec3::new(1.0, 1.0, 0.75)).unwrap();
        mesh
    }

    #[test]
    fn scan_finds_extrema() {
        let e = Extrema::scan(&bumpy()).unwrap();
        assert_eq!(e.min_z, -0.5);
        assert_eq!(e.max_z, 0.75);
        assert_eq!(e.span(), 1.25);
    }

    #[test]
    fn cache_hits_until_mesh_changes() {
        let mut mesh = bumpy();
        let mut cache = ElevationCache::new();
        assert_eq!(cache.max_z(&mesh), Some(0.75));
        assert_eq!(cache.min_z(&mesh), Some(-0.5));
        assert_eq!(cache.scans(), 1);

        mesh.set_vertex(4, Vec3::new(0.0, 0.0, 3.0)).unwrap();
        assert_eq!(cache.max_z(&mesh), Some(3.0));
        assert_eq!(cache.scans(), 2);
    }

    #[test]
    fn invalidate_forces_rescan() {
        let mesh = bumpy();
        let mut cache = ElevationCache::new();
        cache.get(&mesh);
        cache.invalidate();
        cache.get(&mesh);
        assert_eq!(cache.scans(), 2);
    }
}
