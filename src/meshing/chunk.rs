//! Output of chunk mesh generation.

use crate::math::Aabb;
use crate::mesh::MeshBuffer;

/// Merged geometry for one material.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialMesh {
    pub material_id: i32,
    pub mesh: MeshBuffer,
}

/// Geometry of one chunk, split by material and sorted by material id.
///
/// The caller owns the buffers; dropping the chunk releases them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshChunk {
    materials: Vec<MaterialMesh>,
}

impl MeshChunk {
    pub(crate) fn from_materials(materials: Vec<MaterialMesh>) -> Self {
        Self { materials }
    }

    /// A chunk with no materials
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Material ids, parallel to [`MeshChunk::meshes`]
    pub fn material_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.materials.iter().map(|m| m.material_id)
    }

    /// Merged buffers, parallel to [`MeshChunk::material_ids`]
    pub fn meshes(&self) -> impl Iterator<Item = &MeshBuffer> + '_ {
        self.materials.iter().map(|m| &m.mesh)
    }

    pub fn materials(&self) -> &[MaterialMesh] {
        &self.materials
    }

    /// Buffer for a material id, if present
    pub fn mesh_for(&self, material_id: i32) -> Option<&MeshBuffer> {
        self.materials
            .binary_search_by_key(&material_id, |m| m.material_id)
            .ok()
            .map(|i| &self.materials[i].mesh)
    }

    /// Total vertices over all materials
    pub fn vertex_count(&self) -> usize {
        self.materials.iter().map(|m| m.mesh.vertex_count()).sum()
    }

    /// Total triangles over all materials
    pub fn triangle_count(&self) -> usize {
        self.materials.iter().map(|m| m.mesh.triangle_count()).sum()
    }

    /// Chunk-local bounds of all geometry, `None` if there is none
    pub fn bounds(&self) -> Option<Aabb> {
        self.meshes()
            .filter_map(MeshBuffer::bounds)
            .reduce(|a, b| a.merged(&b))
    }

    /// Take ownership of the per-material buffers
    pub fn into_materials(self) -> Vec<MaterialMesh> {
        self.materials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Vertex;
    use glam::Vec3;

    fn mesh_with(n: usize) -> MeshBuffer {
        let mut mesh = MeshBuffer::new();
        for _ in 0..n {
            mesh.add_vertex(Vertex::at(Vec3::ZERO));
        }
        mesh
    }

    #[test]
    fn test_empty() {
        let chunk = MeshChunk::empty();
        assert_eq!(chunk.material_count(), 0);
        assert!(chunk.is_empty());
        assert_eq!(chunk.vertex_count(), 0);
    }

    #[test]
    fn test_parallel_views_and_lookup() {
        let chunk = MeshChunk::from_materials(vec![
            MaterialMesh { material_id: -4, mesh: mesh_with(1) },
            MaterialMesh { material_id: 2, mesh: mesh_with(3) },
        ]);
        assert_eq!(chunk.material_ids().collect::<Vec<_>>(), vec![-4, 2]);
        assert_eq!(chunk.meshes().map(|m| m.vertex_count()).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(chunk.mesh_for(2).map(|m| m.vertex_count()), Some(3));
        assert!(chunk.mesh_for(7).is_none());
        assert_eq!(chunk.vertex_count(), 4);
    }

    #[test]
    fn test_bounds_skip_empty_materials() {
        let mut far = MeshBuffer::new();
        far.add_vertex(Vertex::at(Vec3::new(3.0, 1.0, 2.0)));
        let chunk = MeshChunk::from_materials(vec![
            MaterialMesh { material_id: 0, mesh: mesh_with(2) },
            MaterialMesh { material_id: 1, mesh: MeshBuffer::new() },
            MaterialMesh { material_id: 2, mesh: far },
        ]);
        let bounds = chunk.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(3.0, 1.0, 2.0));
        assert!(MeshChunk::empty().bounds().is_none());
    }
}
