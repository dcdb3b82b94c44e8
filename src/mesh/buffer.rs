//! Append-only vertex/index container.

use crate::core::types::{Mat3, Mat4, Vec3};
use crate::math::Aabb;
use crate::mesh::vertex::{Vertex, VertexIndex};

/// A list of vertices plus an optional triangle index list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    vertices: Vec<Vertex>,
    indices: Vec<VertexIndex>,
}

impl MeshBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer from existing data
    pub fn from_parts(vertices: Vec<Vertex>, indices: Vec<VertexIndex>) -> Self {
        Self { vertices, indices }
    }

    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn add_index(&mut self, index: VertexIndex) {
        self.indices.push(index);
    }

    /// Add a quad as two triangles (`a b c`, `a c d`) referencing new vertices
    pub fn add_quad(&mut self, corners: [Vertex; 4]) {
        let base = self.vertices.len() as VertexIndex;
        self.vertices.extend_from_slice(&corners);
        self.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Transform every vertex in place
    pub fn transform(&mut self, transformation: &Mat4) {
        let count = self.vertices.len();
        self.transform_range(transformation, 0, count);
    }

    /// Append `other`'s vertices and indices, optionally transforming the
    /// appended vertices. Appended indices are offset by the previous vertex
    /// count so they keep pointing at their own vertices.
    pub fn append(&mut self, other: &MeshBuffer, transformation: Option<&Mat4>) {
        let index_offset = self.vertices.len() as VertexIndex;
        self.indices.reserve(other.indices.len());
        self.indices.extend(other.indices.iter().map(|&i| i + index_offset));

        let start = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        if let Some(transformation) = transformation {
            self.transform_range(transformation, start, other.vertices.len());
        }
    }

    /// Positions get the full affine transform; normals, tangents and
    /// bitangents only the rotation/scale part, renormalized.
    fn transform_range(&mut self, transformation: &Mat4, first: usize, count: usize) {
        let rotation = Mat3::from_mat4(*transformation);
        for vertex in &mut self.vertices[first..first + count] {
            vertex.position = transformation.transform_point3(vertex.position);
            vertex.normal = (rotation * vertex.normal).normalize_or_zero();
            vertex.tangent = (rotation * vertex.tangent).normalize_or_zero();
            vertex.bitangent = (rotation * vertex.bitangent).normalize_or_zero();
        }
    }

    /// Recompute vertex normals from the indexed triangles.
    ///
    /// Each vertex gets the normalized sum of its adjacent face normals.
    /// Trailing indices that don't form a full triangle are ignored.
    pub fn calc_normals(&mut self) {
        let mut sums = vec![Vec3::ZERO; self.vertices.len()];
        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let (pa, pb, pc) = (
                self.vertices[a].position,
                self.vertices[b].position,
                self.vertices[c].position,
            );
            let face = (pb - pa).cross(pc - pa);
            sums[a] += face;
            sums[b] += face;
            sums[c] += face;
        }
        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            vertex.normal = sum.normalize_or_zero();
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[VertexIndex] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Number of complete indexed triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Bounding box of all vertex positions
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().map(|v| v.position))
    }

    /// Vertex data as raw bytes, ready for upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index data as raw bytes, ready for upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec2};

    fn triangle() -> MeshBuffer {
        let mut buffer = MeshBuffer::new();
        buffer.add_vertex(Vertex::at(Vec3::ZERO).with_frame(Vec3::Z, Vec3::X));
        buffer.add_vertex(Vertex::at(Vec3::X).with_frame(Vec3::Z, Vec3::X));
        buffer.add_vertex(Vertex::at(Vec3::Y).with_frame(Vec3::Z, Vec3::X));
        buffer.add_index(0);
        buffer.add_index(1);
        buffer.add_index(2);
        buffer
    }

    #[test]
    fn test_append_offsets_indices() {
        let mut merged = triangle();
        merged.append(&triangle(), None);
        assert_eq!(merged.vertex_count(), 6);
        assert_eq!(merged.indices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(merged.triangle_count(), 2);
    }

    #[test]
    fn test_append_with_translation_only_moves_new_vertices() {
        let mut merged = triangle();
        let offset = Mat4::from_translation(Vec3::new(2.0, 3.0, 4.0));
        merged.append(&triangle(), Some(&offset));

        assert_eq!(merged.vertices()[0].position, Vec3::ZERO);
        assert_eq!(merged.vertices()[3].position, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(merged.vertices()[4].position, Vec3::new(3.0, 3.0, 4.0));
        // translation leaves directions alone
        assert_eq!(merged.vertices()[4].normal, Vec3::Z);
    }

    #[test]
    fn test_transform_rotates_frame() {
        let mut buffer = triangle();
        buffer.transform(&Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)));
        let v = buffer.vertices()[1];
        assert!(v.position.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-5));
        assert!(v.normal.abs_diff_eq(Vec3::X, 1e-5));
        assert!(v.tangent.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-5));
    }

    #[test]
    fn test_transform_renormalizes_under_scale() {
        let mut buffer = triangle();
        buffer.transform(&Mat4::from_scale(Vec3::splat(3.0)));
        assert_eq!(buffer.vertices()[1].position, Vec3::new(3.0, 0.0, 0.0));
        assert!(buffer.vertices()[1].normal.abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn test_calc_normals() {
        let mut buffer = MeshBuffer::new();
        buffer.add_quad([
            Vertex::at(Vec3::ZERO),
            Vertex::at(Vec3::X),
            Vertex::at(Vec3::new(1.0, 1.0, 0.0)),
            Vertex::at(Vec3::Y).with_tex_coord(Vec2::Y),
        ]);
        buffer.calc_normals();
        for v in buffer.vertices() {
            assert!(v.normal.abs_diff_eq(Vec3::Z, 1e-6));
        }
    }

    #[test]
    fn test_bounds() {
        assert!(MeshBuffer::new().bounds().is_none());
        let mut buffer = triangle();
        buffer.append(&triangle(), Some(&Mat4::from_translation(Vec3::splat(5.0))));
        let bounds = buffer.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(6.0, 6.0, 5.0));
    }

    #[test]
    fn test_byte_views() {
        let buffer = triangle();
        assert_eq!(buffer.vertex_bytes().len(), 3 * std::mem::size_of::<Vertex>());
        assert_eq!(buffer.index_bytes().len(), 3 * 4);
    }
}
