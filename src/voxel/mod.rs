//! Voxel data structures and volume access

pub mod voxel;
pub mod volume;
pub mod region;

pub use voxel::{Voxel, VOXEL_BITS, VOXEL_SIZE};
pub use volume::{DenseVolume, VoxelVolume};
pub use region::ChunkRegion;
