use demoscape_common::Bounds2;
use glam::Vec3;

use crate::mesh::{MAX_DIVISIONS, Mesh, TerrainError};

/// Build a flat `divisions × divisions` grid at `z = 0`.
///
/// Emits `(divisions + 1)²` vertices row-major and two triangles per cell.
/// Positions are computed from the row/column index rather than accumulated,
/// so the last row and column land exactly on `max_x` / `max_y`.
pub fn build_grid(divisions: u32, bounds: Bounds2) -> Result<Mesh, TerrainError> {
    if divisions == 0 || divisions > MAX_DIVISIONS {
        return Err(TerrainError::InvalidDivisions {
            divisions,
            max: MAX_DIVISIONS,
        });
    }
    if !bounds.is_valid() {
        return Err(TerrainError::InvalidBounds {
            min_x: bounds.min_x,
            max_x: bounds.max_x,
            min_y: bounds.min_y,
            max_y: bounds.max_y,
        });
    }

    let row_len = divisions + 1;
    let (vertex_count, face_count) = grid_counts(divisions);
    let x_step = bounds.width() / divisions as f32;
    let y_step = bounds.height() / divisions as f32;

    let mut vertices = Vec::with_capacity(vertex_count);
    for row in 0..row_len {
        let y = if row == divisions {
            bounds.max_y
        } else {
            bounds.min_y + row as f32 * y_step
        };
        for col in 0..row_len {
            let x = if col == divisions {
                bounds.max_x
            } else {
                bounds.min_x + col as f32 * x_step
            };
            vertices.push(Vec3::new(x, y, 0.0));
        }
    }

    let mut faces = Vec::with_capacity(face_count);
    for row in 0..divisions {
        let offset = row * row_len;
        for col in 0..divisions {
            let base = offset + col;
            // Lower-left triangle: two corners on this row.
            faces.push([base, base + 1, base + row_len]);
            // Upper-right triangle: one corner on this row.
            faces.push([base + 1, base + 1 + row_len, base + row_len]);
        }
    }

    let edges = edges_from_faces(&faces);
    tracing::debug!(
        divisions,
        vertices = vertices.len(),
        faces = faces.len(),
        edges = edges.len(),
        "grid built"
    );

    Ok(Mesh::from_parts(divisions, bounds, vertices, faces, edges))
}

/// Vertex and face counts of a `divisions × divisions` grid.
fn grid_counts(divisions: u32) -> (usize, usize) {
    let cells = divisions as usize;
    ((cells + 1) * (cells + 1), 2 * cells * cells)
}

/// Wireframe edge list: the three edges of every face in face order.
/// Shared edges appear once per adjacent face.
pub fn edges_from_faces(faces: &[[u32; 3]]) -> Vec<[u32; 2]> {
    faces
        .iter()
        .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]])
        .collect()
}
