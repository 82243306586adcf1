use glam::Vec3;

use crate::mesh::Mesh;

/// Unnormalized face normal `(b - a) × (c - a)`; its length is twice the area.
pub fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a)
}

/// Add `face` to the running unit normal `acc` and renormalize.
///
/// The accumulator is renormalized after every contribution, so each new face
/// is blended against a unit-length running normal rather than summed by area.
/// A zero-length result stays zero.
pub fn accumulate_normal(acc: Vec3, face: Vec3) -> Vec3 {
    (acc + face).normalize_or_zero()
}

/// Recompute per-vertex normals from the current heights.
pub fn calculate_normals(mesh: &mut Mesh) {
    let (vertices, faces, normals) = mesh.geometry_mut();
    normals.fill(Vec3::ZERO);
    for &[i1, i2, i3] in faces {
        let (i1, i2, i3) = (i1 as usize, i2 as usize, i3 as usize);
        let n = face_normal(vertices[i1], vertices[i2], vertices[i3]);
        for i in [i1, i2, i3] {
            normals[i] = accumulate_normal(normals[i], n);
        }
    }
}
