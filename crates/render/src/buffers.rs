use demoscape_common::Bounds2;
use demoscape_terrain::Mesh;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Flat, GPU-ready copy of a terrain mesh.
///
/// `vertices` and `normals` hold `3·N` floats, `faces` holds `3·F` indices and
/// `edges` holds `2·E` indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffers {
    pub divisions: u32,
    pub bounds: Bounds2,
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub faces: Vec<u32>,
    pub edges: Vec<u32>,
}

impl MeshBuffers {
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let buffers = Self {
            divisions: mesh.divisions(),
            bounds: mesh.bounds(),
            vertices: bytemuck::cast_slice(mesh.vertices()).to_vec(),
            normals: bytemuck::cast_slice(mesh.normals()).to_vec(),
            faces: bytemuck::cast_slice(mesh.faces()).to_vec(),
            edges: bytemuck::cast_slice(mesh.edges()).to_vec(),
        };
        tracing::debug!(
            vertices = buffers.vertex_count(),
            faces = buffers.face_count(),
            edges = buffers.edge_count(),
            "flattened mesh"
        );
        buffers
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn face_count(&self) -> usize {
        self.faces.len() / 3
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    /// Raw bytes of the position buffer, ready for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn face_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.faces)
    }

    /// Check strides, the normals/vertices pairing and index bounds.
    ///
    /// Buffers built by [`MeshBuffers::from_mesh`] always pass; this is for
    /// buffers read back from disk.
    pub fn validate(&self) -> Result<(), RenderError> {
        check_stride("vertices", self.vertices.len(), 3)?;
        check_stride("faces", self.faces.len(), 3)?;
        check_stride("edges", self.edges.len(), 2)?;
        if self.normals.len() != self.vertices.len() {
            return Err(RenderError::LengthMismatch {
                buffer: "normals",
                len: self.normals.len(),
                expected: self.vertices.len(),
            });
        }
        let row = self.divisions as usize + 1;
        if self.vertex_count() != row * row {
            return Err(RenderError::LengthMismatch {
                buffer: "vertices",
                len: self.vertices.len(),
                expected: row * row * 3,
            });
        }
        let vertex_count = self.vertex_count();
        for (buffer, indices) in [("faces", &self.faces), ("edges", &self.edges)] {
            if let Some(&index) = indices.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(RenderError::IndexOutOfRange {
                    buffer,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }
}

fn check_stride(buffer: &'static str, len: usize, stride: usize) -> Result<(), RenderError> {
    if len % stride != 0 {
        return Err(RenderError::BadStride {
            buffer,
            len,
            stride,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use demoscape_terrain::{TerrainConfig, build_grid, generate_seeded};

    fn small_config() -> TerrainConfig {
        TerrainConfig {
            divisions: 8,
            faults: 10,
            ..TerrainConfig::default()
        }
    }

    #[test]
    fn flat_grid_layout() {
        let mesh = build_grid(2, Bounds2::centered(1.0)).unwrap();
        let b = MeshBuffers::from_mesh(&mesh);
        assert_eq!(b.vertices.len(), 27);
        assert_eq!(b.normals.len(), 27);
        assert_eq!(b.faces.len(), 24);
        assert_eq!(b.vertex_count(), 9);
        assert_eq!(b.face_count(), 8);
        assert_eq!(&b.vertices[..3], &[-1.0, -1.0, 0.0]);
        assert_eq!(&b.vertices[24..], &[1.0, 1.0, 0.0]);
        assert_eq!(&b.faces[..3], &[0, 1, 3]);
        b.validate().unwrap();
    }

    #[test]
    fn matches_generated_mesh() {
        let mesh = generate_seeded(&small_config()).unwrap();
        let b = MeshBuffers::from_mesh(&mesh);
        for (i, v) in mesh.vertices().iter().enumerate() {
            assert_eq!(&b.vertices[i * 3..i * 3 + 3], &v.to_array());
        }
        for (i, n) in mesh.normals().iter().enumerate() {
            assert_eq!(&b.normals[i * 3..i * 3 + 3], &n.to_array());
        }
        assert_eq!(b.edge_count(), mesh.edges().len());
        assert_eq!(b.vertex_bytes().len(), b.vertices.len() * 4);
        assert_eq!(b.face_bytes().len(), b.faces.len() * 4);
        b.validate().unwrap();
    }

    #[test]
    fn validate_catches_bad_buffers() {
        let mesh = build_grid(2, Bounds2::centered(1.0)).unwrap();
        let good = MeshBuffers::from_mesh(&mesh);

        let mut short_normals = good.clone();
        short_normals.normals.truncate(24);
        assert!(matches!(
            short_normals.validate(),
            Err(RenderError::LengthMismatch { buffer: "normals", .. })
        ));

        let mut ragged = good.clone();
        ragged.faces.pop();
        assert!(matches!(
            ragged.validate(),
            Err(RenderError::BadStride { buffer: "faces", .. })
        ));

        let mut dangling = good;
        dangling.edges[0] = 9;
        assert!(matches!(
            dangling.validate(),
            Err(RenderError::IndexOutOfRange { index: 9, .. })
        ));
    }
}
