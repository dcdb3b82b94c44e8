//! Per-call working state of chunk mesh generation.
//!
//! The environment covers the requested region plus a one-voxel halo on
//! every side, so boundary voxels can see their outside neighbors. It lives
//! for exactly one `generate_chunk` call.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::condition::ConditionSolver;
use crate::core::types::{IVec3, Vec3};
use crate::mesh::MeshBuffer;
use crate::meshing::chunk::{MaterialMesh, MeshChunk};
use crate::meshing::voxel_mesh::{BlockFace, BlockVoxelMesh, VoxelMesh, VoxelMeshId};
use crate::voxel::{ChunkRegion, Voxel, VoxelVolume};

/// Counters gathered while building one chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct EnvironmentStats {
    /// Voxels read, halo included
    pub voxels_read: usize,
    /// Interior voxels with at least one matched rule
    pub matched_voxels: usize,
    /// Face templates appended
    pub faces_emitted: usize,
}

pub(crate) struct ChunkEnvironment {
    /// Padded extent, `region.size + 2`
    dims: [usize; 3],
    voxels: Vec<Voxel>,
    /// Flat list of matched rule ids; `match_ranges[i]` slices it per voxel
    match_ids: Vec<VoxelMeshId>,
    match_ranges: Vec<Range<u32>>,
    transparent: Vec<bool>,
    /// Only meaningful for interior voxels; the halo stays zero
    neighbor_masks: Vec<u8>,
    materials: BTreeMap<i32, MeshBuffer>,
    stats: EnvironmentStats,
}

impl ChunkEnvironment {
    /// Read the padded block starting one voxel before `region.origin`.
    ///
    /// The caller has checked that the padded region fits in `i32`.
    pub(crate) fn read<V: VoxelVolume + ?Sized>(volume: &V, region: &ChunkRegion) -> Self {
        let dims = [
            region.size.x as usize + 2,
            region.size.y as usize + 2,
            region.size.z as usize + 2,
        ];
        let count = dims[0] * dims[1] * dims[2];
        let start = region.origin - IVec3::ONE;

        let mut voxels = Vec::with_capacity(count);
        for z in 0..dims[2] as i32 {
            for y in 0..dims[1] as i32 {
                for x in 0..dims[0] as i32 {
                    voxels.push(volume.read_voxel(start.x + x, start.y + y, start.z + z));
                }
            }
        }

        Self {
            dims,
            voxels,
            match_ids: Vec::new(),
            match_ranges: Vec::with_capacity(count),
            transparent: Vec::with_capacity(count),
            neighbor_masks: vec![0; count],
            materials: BTreeMap::new(),
            stats: EnvironmentStats {
                voxels_read: count,
                ..Default::default()
            },
        }
    }

    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        z * self.dims[0] * self.dims[1] + y * self.dims[0] + x
    }

    fn matches_at(&self, index: usize) -> &[VoxelMeshId] {
        let range = &self.match_ranges[index];
        &self.match_ids[range.start as usize..range.end as usize]
    }

    /// Gather the matching rules of every padded voxel.
    pub(crate) fn match_voxels(&mut self, solver: &ConditionSolver<VoxelMeshId>) {
        for voxel in &self.voxels {
            let start = self.match_ids.len() as u32;
            solver.gather_into(voxel.as_bytes(), &mut self.match_ids);
            self.match_ranges.push(start..self.match_ids.len() as u32);
        }
    }

    /// A voxel is transparent iff all of its rules are, which includes
    /// having no rules at all.
    pub(crate) fn compute_transparency(&mut self, meshes: &[VoxelMesh]) {
        for index in 0..self.voxels.len() {
            let transparent = self
                .matches_at(index)
                .iter()
                .all(|id| meshes[id.index()].is_transparent());
            self.transparent.push(transparent);
        }
    }

    /// Set one bit per direction whose immediate neighbor is transparent.
    ///
    /// Depends only on the neighbors, never on the voxel itself.
    pub(crate) fn compute_neighbor_masks(&mut self) {
        for (x, y, z) in interior(self.dims) {
            let mut mask = 0u8;
            for face in BlockFace::DIRECTIONS {
                let offset = face.offset();
                let neighbor = self.index(
                    (x as i32 + offset.x) as usize,
                    (y as i32 + offset.y) as usize,
                    (z as i32 + offset.z) as usize,
                );
                if self.transparent[neighbor] {
                    mask |= face.mask_bit();
                }
            }
            let index = self.index(x, y, z);
            self.neighbor_masks[index] = mask;
        }
    }

    /// Append each interior voxel's visible geometry to its material buffer.
    pub(crate) fn emit_geometry(&mut self, meshes: &[VoxelMesh]) {
        for (x, y, z) in interior(self.dims) {
            let index = self.index(x, y, z);
            let range = self.match_ranges[index].clone();
            if range.is_empty() {
                continue;
            }
            self.stats.matched_voxels += 1;

            let mask = self.neighbor_masks[index];
            let translation = Vec3::new(x as f32 - 1.0, y as f32 - 1.0, z as f32 - 1.0);
            for i in range {
                let id = self.match_ids[i as usize];
                match &meshes[id.index()] {
                    VoxelMesh::Block(block) => {
                        self.stats.faces_emitted +=
                            emit_block(&mut self.materials, block, mask, translation);
                    }
                }
            }
        }
    }

    pub(crate) fn stats(&self) -> EnvironmentStats {
        self.stats
    }

    /// Hand the material buffers over; everything else is dropped.
    pub(crate) fn into_chunk(self) -> MeshChunk {
        let materials = self
            .materials
            .into_iter()
            .map(|(material_id, mesh)| MaterialMesh { material_id, mesh })
            .collect();
        MeshChunk::from_materials(materials)
    }

    #[cfg(test)]
    fn mask_at(&self, x: usize, y: usize, z: usize) -> u8 {
        self.neighbor_masks[self.index(x, y, z)]
    }

    #[cfg(test)]
    fn transparent_at(&self, x: usize, y: usize, z: usize) -> bool {
        self.transparent[self.index(x, y, z)]
    }
}

/// Positions of the requested region inside a padded block of `dims`
fn interior(dims: [usize; 3]) -> impl Iterator<Item = (usize, usize, usize)> {
    let [w, h, d] = dims;
    (1..d - 1).flat_map(move |z| {
        (1..h - 1).flat_map(move |y| (1..w - 1).map(move |x| (x, y, z)))
    })
}

/// Returns the number of templates appended.
fn emit_block(
    materials: &mut BTreeMap<i32, MeshBuffer>,
    block: &BlockVoxelMesh,
    mask: u8,
    translation: Vec3,
) -> usize {
    let buffer = materials.entry(block.material_id).or_default();
    if mask == 0 {
        return 0;
    }

    let mut emitted = 0;
    if let Some(center) = block.faces.get(BlockFace::Center) {
        buffer.append(&center.buffer, Some(&center.placement(translation)));
        emitted += 1;
    }
    for face in BlockFace::DIRECTIONS {
        if mask & face.mask_bit() == 0 {
            continue;
        }
        if let Some(template) = block.faces.get(face) {
            buffer.append(&template.buffer, Some(&template.placement(translation)));
            emitted += 1;
        }
    }
    emitted
}
