use std::sync::atomic::{AtomicU64, Ordering};

use demoscape_common::Bounds2;
use glam::Vec3;

/// Largest division count whose `(div + 1)²` vertices still fit a `u32` index.
pub const MAX_DIVISIONS: u32 = 65_534;

static GENERATION: AtomicU64 = AtomicU64::new(1);

/// Process-wide stamp so no two mesh states share a generation.
fn next_generation() -> u64 {
    GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Errors from terrain construction and vertex access.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    #[error("divisions must be in 1..={max}, got {divisions}")]
    InvalidDivisions { divisions: u32, max: u32 },
    #[error("invalid bounds: x [{min_x}, {max_x}], y [{min_y}, {max_y}]")]
    InvalidBounds {
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
    },
    #[error("invalid fault parameter {name}: {value}")]
    InvalidFaultParameter { name: &'static str, value: f32 },
    #[error("vertex index {index} out of range for {len} vertices")]
    VertexIndexOutOfRange { index: usize, len: usize },
}

/// A triangulated terrain grid.
///
/// Vertices are laid out row-major from `(min_x, min_y)` to `(max_x, max_y)`.
/// Heights live in the `z` component.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    divisions: u32,
    bounds: Bounds2,
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
    faces: Vec<[u32; 3]>,
    edges: Vec<[u32; 2]>,
    generation: u64,
}

impl Mesh {
    pub(crate) fn from_parts(
        divisions: u32,
        bounds: Bounds2,
        vertices: Vec<Vec3>,
        faces: Vec<[u32; 3]>,
        edges: Vec<[u32; 2]>,
    ) -> Self {
        let normals = vec![Vec3::ZERO; vertices.len()];
        Self {
            divisions,
            bounds,
            vertices,
            normals,
            faces,
            edges,
            generation: next_generation(),
        }
    }

    /// Grid cells along each axis.
    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    pub fn bounds(&self) -> Bounds2 {
        self.bounds
    }

    /// Vertices per grid row, `divisions + 1`.
    pub fn row_len(&self) -> usize {
        self.divisions as usize + 1
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    pub fn edges(&self) -> &[[u32; 2]] {
        &self.edges
    }

    /// Stamp refreshed by every height mutation, unique across meshes.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Position of vertex `index`.
    pub fn vertex(&self, index: usize) -> Result<Vec3, TerrainError> {
        self.vertices
            .get(index)
            .copied()
            .ok_or(TerrainError::VertexIndexOutOfRange {
                index,
                len: self.vertices.len(),
            })
    }

    /// Vertex at grid `(row, col)`.
    pub fn vertex_at(&self, row: usize, col: usize) -> Result<Vec3, TerrainError> {
        let row_len = self.row_len();
        if col >= row_len {
            return Err(TerrainError::VertexIndexOutOfRange {
                index: row * row_len + col,
                len: self.vertices.len(),
            });
        }
        self.vertex(row * row_len + col)
    }

    /// Overwrite vertex `index`.
    pub fn set_vertex(&mut self, index: usize, v: Vec3) -> Result<(), TerrainError> {
        let len = self.vertices.len();
        let slot = self
            .vertices
            .get_mut(index)
            .ok_or(TerrainError::VertexIndexOutOfRange { index, len })?;
        *slot = v;
        self.generation = next_generation();
        Ok(())
    }

    /// Normal of vertex `index`.
    pub fn normal(&self, index: usize) -> Result<Vec3, TerrainError> {
        self.normals
            .get(index)
            .copied()
            .ok_or(TerrainError::VertexIndexOutOfRange {
                index,
                len: self.normals.len(),
            })
    }

    pub(crate) fn vertices_mut(&mut self) -> &mut [Vec3] {
        self.generation = next_generation();
        &mut self.vertices
    }

    /// Split borrow for normal accumulation.
    pub(crate) fn geometry_mut(&mut self) -> (&[Vec3], &[[u32; 3]], &mut [Vec3]) {
        (&self.vertices, &self.faces, &mut self.normals)
    }
}
