//! Chunk mesh generation.
//!
//! Voxel mesh rules are matched against every voxel of a region through a
//! [`ConditionSolver`](crate::condition::ConditionSolver); matching rules
//! emit their face templates, culled against opaque neighbors, into one
//! merged buffer per material.

pub mod chunk;
pub mod config;
mod environment;
pub mod generator;
pub mod job;
pub mod templates;
pub mod voxel_mesh;

pub use chunk::{MaterialMesh, MeshChunk};
pub use config::{BlockMeshConfig, BlockTemplate, GeneratorConfig};
pub use generator::MeshChunkGenerator;
pub use job::MeshChunkJob;
pub use voxel_mesh::{
    BlockFace, BlockFaces, BlockVoxelMesh, FaceTemplate, OpeningState, VoxelMesh, VoxelMeshId,
    BLOCK_FACE_COUNT,
};
