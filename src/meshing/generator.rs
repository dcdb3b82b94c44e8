//! Chunk mesh generator: registered voxel mesh rules plus the meshing pass.

use std::time::Instant;

use rayon::prelude::*;

use crate::condition::{BitCondition, ConditionSolver};
use crate::core::{Error, Result};
use crate::meshing::chunk::MeshChunk;
use crate::meshing::config::GeneratorConfig;
use crate::meshing::environment::ChunkEnvironment;
use crate::meshing::voxel_mesh::{BlockFaces, BlockVoxelMesh, OpeningState, VoxelMesh, VoxelMeshId};
use crate::voxel::{ChunkRegion, VoxelVolume, VOXEL_BITS};

/// Generates the graphical representation of voxel regions.
///
/// Voxel mesh rules are registered up front; each rule is found through its
/// bit conditions and decides what geometry a matching voxel contributes.
///
/// Registration takes `&mut self` and generation `&self`, so a generator
/// shared behind an `Arc` (or `Arc<RwLock<_>>` when rules change at runtime)
/// can mesh many chunks in parallel once its rules are in place.
#[derive(Debug)]
pub struct MeshChunkGenerator {
    config: GeneratorConfig,
    voxel_meshes: Vec<VoxelMesh>,
    block_mesh_conditions: ConditionSolver<VoxelMeshId>,
}

impl MeshChunkGenerator {
    /// Create a generator with default limits and no rules
    pub fn new() -> Self {
        Self::with_config(GeneratorConfig::default())
    }

    /// Create a generator with the given limits and no rules.
    ///
    /// `config.block_meshes` is ignored here; see [`MeshChunkGenerator::from_config`].
    pub fn with_config(config: GeneratorConfig) -> Self {
        Self {
            config,
            voxel_meshes: Vec::new(),
            block_mesh_conditions: ConditionSolver::new(),
        }
    }

    /// Create a generator and register every block mesh the config declares.
    pub fn from_config(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let block_meshes = config.block_meshes.clone();
        let mut generator = Self::with_config(config);
        for block in &block_meshes {
            generator.register_block_voxel_mesh(
                block.material_id,
                &block.conditions,
                block.opening_state,
                block.template.faces(),
            )?;
        }
        log::debug!("Registered {} block meshes from config", block_meshes.len());
        Ok(generator)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Number of registered voxel meshes
    pub fn voxel_mesh_count(&self) -> usize {
        self.voxel_meshes.len()
    }

    pub fn voxel_mesh(&self, id: VoxelMeshId) -> Option<&VoxelMesh> {
        self.voxel_meshes.get(id.index())
    }

    /// Register a block voxel mesh.
    ///
    /// Voxels matching every condition get `faces` emitted into the buffer
    /// of `material_id`. Each filled face slot is shared, not copied.
    ///
    /// Fails without changing any state when the voxel mesh limit is reached
    /// or a condition can never hold for a voxel record.
    pub fn register_block_voxel_mesh(
        &mut self,
        material_id: i32,
        conditions: &[BitCondition],
        opening_state: impl Into<OpeningState>,
        faces: BlockFaces,
    ) -> Result<VoxelMeshId> {
        if let Some(limit) = self.config.max_voxel_meshes {
            if self.voxel_meshes.len() >= limit {
                log::error!("Can't create more voxel meshes (limit is {})", limit);
                return Err(Error::CapacityExceeded { limit });
            }
        }
        for condition in conditions {
            if let Err(e) = condition.validate(VOXEL_BITS) {
                log::error!("Rejected block voxel mesh for material {}: {}", material_id, e);
                return Err(e);
            }
        }

        let id = VoxelMeshId(self.voxel_meshes.len() as u32);
        let opening_state = opening_state.into();
        log::trace!(
            "Block voxel mesh {:?}: material {}, {:?}, {} conditions, {} faces",
            id, material_id, opening_state, conditions.len(), faces.len()
        );
        self.voxel_meshes.push(VoxelMesh::Block(BlockVoxelMesh {
            material_id,
            opening_state,
            faces,
        }));
        self.block_mesh_conditions.add_conditions(conditions, id);
        log::trace!(
            "Condition solver: {} nodes, {} payloads",
            self.block_mesh_conditions.node_count(),
            self.block_mesh_conditions.payload_count()
        );
        Ok(id)
    }

    /// Mesh one region of `volume`.
    ///
    /// Returns one merged buffer per material id seen among the region's
    /// voxels, sorted by id. An empty region yields an empty chunk.
    pub fn generate_chunk<V: VoxelVolume + ?Sized>(&self, volume: &V, region: ChunkRegion) -> Result<MeshChunk> {
        if region.is_empty() {
            return Ok(MeshChunk::empty());
        }
        self.check_region(&region)?;

        let start = Instant::now();
        let mut env = ChunkEnvironment::read(volume, &region);
        env.match_voxels(&self.block_mesh_conditions);
        env.compute_transparency(&self.voxel_meshes);
        env.compute_neighbor_masks();
        env.emit_geometry(&self.voxel_meshes);

        let stats = env.stats();
        let chunk = env.into_chunk();
        log::debug!(
            "Meshed chunk at {:?} (size {:?}, {} matched): {} materials, {} faces, {} vertices in {:.2}ms",
            region.origin,
            region.size,
            stats.matched_voxels,
            chunk.material_count(),
            stats.faces_emitted,
            chunk.vertex_count(),
            start.elapsed().as_secs_f64() * 1000.0,
        );
        Ok(chunk)
    }

    /// Shorthand for [`MeshChunkGenerator::generate_chunk`] with the flat
    /// `(x, y, z, w, h, d)` region form.
    pub fn generate_chunk_at<V: VoxelVolume + ?Sized>(
        &self,
        volume: &V,
        x: i32, y: i32, z: i32,
        w: u32, h: u32, d: u32,
    ) -> Result<MeshChunk> {
        self.generate_chunk(volume, ChunkRegion::from_xyzwhd(x, y, z, w, h, d))
    }

    /// Mesh many regions in parallel. Results are in `regions` order.
    pub fn generate_chunks<V: VoxelVolume + ?Sized>(&self, volume: &V, regions: &[ChunkRegion]) -> Vec<Result<MeshChunk>> {
        let start = Instant::now();
        let results: Vec<_> = regions
            .par_iter()
            .map(|region| self.generate_chunk(volume, *region))
            .collect();

        let elapsed = start.elapsed();
        log::debug!(
            "Meshed {} chunks in {:.1}ms ({} failed)",
            results.len(),
            elapsed.as_secs_f64() * 1000.0,
            results.iter().filter(|r| r.is_err()).count(),
        );
        results
    }

    fn check_region(&self, region: &ChunkRegion) -> Result<()> {
        if !region.padded_fits_i32() {
            let err = Error::InvalidRegion(format!(
                "{:?} + {:?} leaves the i32 coordinate range", region.origin, region.size
            ));
            log::error!("{}", err);
            return Err(err);
        }
        let limit = self.config.max_region_voxels;
        let padded = region.padded_voxel_count().filter(|&count| count <= limit);
        if padded.is_none() {
            let err = Error::InvalidRegion(format!(
                "{:?} padded voxels exceed the limit of {}", region.padded_size(), limit
            ));
            log::error!("{}", err);
            return Err(err);
        }
        Ok(())
    }
}

impl Default for MeshChunkGenerator {
    fn default() -> Self {
        Self::new()
    }
}
