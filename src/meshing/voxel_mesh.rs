//! Voxel mesh rules: what geometry a matching voxel contributes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::types::{IVec3, Mat4};
use crate::mesh::MeshBuffer;

/// Number of geometry slots on a block voxel mesh
pub const BLOCK_FACE_COUNT: usize = 7;

/// Geometry slot of a block voxel mesh.
///
/// `Center` is drawn whenever any neighbor is see-through; each direction is
/// drawn when the neighbor on that side is see-through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockFace {
    Center,
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl BlockFace {
    /// All slots in storage order
    pub const ALL: [BlockFace; BLOCK_FACE_COUNT] = [
        BlockFace::Center,
        BlockFace::PositiveX,
        BlockFace::NegativeX,
        BlockFace::PositiveY,
        BlockFace::NegativeY,
        BlockFace::PositiveZ,
        BlockFace::NegativeZ,
    ];

    /// The six axis directions (everything but `Center`)
    pub const DIRECTIONS: [BlockFace; 6] = [
        BlockFace::PositiveX,
        BlockFace::NegativeX,
        BlockFace::PositiveY,
        BlockFace::NegativeY,
        BlockFace::PositiveZ,
        BlockFace::NegativeZ,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Offset to the neighbor on this side (zero for `Center`)
    pub fn offset(self) -> IVec3 {
        match self {
            BlockFace::Center => IVec3::ZERO,
            BlockFace::PositiveX => IVec3::X,
            BlockFace::NegativeX => IVec3::NEG_X,
            BlockFace::PositiveY => IVec3::Y,
            BlockFace::NegativeY => IVec3::NEG_Y,
            BlockFace::PositiveZ => IVec3::Z,
            BlockFace::NegativeZ => IVec3::NEG_Z,
        }
    }

    /// Bit of the neighbor mask for this side (zero for `Center`).
    ///
    /// `+X=1, -X=2, +Y=4, -Y=8, +Z=16, -Z=32`
    pub fn mask_bit(self) -> u8 {
        match self {
            BlockFace::Center => 0,
            face => 1 << (face.index() - 1),
        }
    }

    pub fn opposite(self) -> BlockFace {
        match self {
            BlockFace::Center => BlockFace::Center,
            BlockFace::PositiveX => BlockFace::NegativeX,
            BlockFace::NegativeX => BlockFace::PositiveX,
            BlockFace::PositiveY => BlockFace::NegativeY,
            BlockFace::NegativeY => BlockFace::PositiveY,
            BlockFace::PositiveZ => BlockFace::NegativeZ,
            BlockFace::NegativeZ => BlockFace::PositiveZ,
        }
    }
}

/// How much a voxel lets its neighbors be seen.
///
/// Any state other than `Closed` counts as transparent for face culling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningState {
    /// Opaque; hides the faces of adjacent voxels
    #[default]
    Closed,
    /// Has geometry but can be seen through (glass, leaves)
    Transparent,
    /// No solid body at all (air, plants)
    Open,
}

impl OpeningState {
    pub fn is_transparent(self) -> bool {
        self != OpeningState::Closed
    }
}

impl From<bool> for OpeningState {
    fn from(transparent: bool) -> Self {
        if transparent {
            OpeningState::Transparent
        } else {
            OpeningState::Closed
        }
    }
}

/// Geometry for one slot: a shared buffer and a transform applied before the
/// per-voxel translation.
#[derive(Clone, Debug)]
pub struct FaceTemplate {
    pub buffer: Arc<MeshBuffer>,
    pub transform: Option<Mat4>,
}

impl FaceTemplate {
    pub fn new(buffer: Arc<MeshBuffer>) -> Self {
        Self { buffer, transform: None }
    }

    pub fn transformed(buffer: Arc<MeshBuffer>, transform: Mat4) -> Self {
        Self { buffer, transform: Some(transform) }
    }

    /// Full transform for a voxel at `translation` (chunk-local)
    pub fn placement(&self, translation: glam::Vec3) -> Mat4 {
        let voxel = Mat4::from_translation(translation);
        match self.transform {
            Some(transform) => voxel * transform,
            None => voxel,
        }
    }
}

/// The seven optional geometry slots of a block voxel mesh.
#[derive(Clone, Debug, Default)]
pub struct BlockFaces {
    slots: [Option<FaceTemplate>; BLOCK_FACE_COUNT],
}

impl BlockFaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a slot to an untransformed buffer
    pub fn with(mut self, face: BlockFace, buffer: Arc<MeshBuffer>) -> Self {
        self.set(face, Some(FaceTemplate::new(buffer)));
        self
    }

    /// Set a slot to a buffer with a pre-transform
    pub fn with_transformed(mut self, face: BlockFace, buffer: Arc<MeshBuffer>, transform: Mat4) -> Self {
        self.set(face, Some(FaceTemplate::transformed(buffer, transform)));
        self
    }

    pub fn set(&mut self, face: BlockFace, template: Option<FaceTemplate>) {
        self.slots[face.index()] = template;
    }

    pub fn get(&self, face: BlockFace) -> Option<&FaceTemplate> {
        self.slots[face.index()].as_ref()
    }

    /// Number of filled slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Filled slots with their face
    pub fn iter(&self) -> impl Iterator<Item = (BlockFace, &FaceTemplate)> {
        BlockFace::ALL
            .into_iter()
            .zip(self.slots.iter())
            .filter_map(|(face, slot)| slot.as_ref().map(|t| (face, t)))
    }
}

/// Handle of a registered voxel mesh inside its generator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelMeshId(pub(crate) u32);

impl VoxelMeshId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A cube-shaped voxel: per-face geometry culled against its neighbors.
#[derive(Clone, Debug)]
pub struct BlockVoxelMesh {
    pub material_id: i32,
    pub opening_state: OpeningState,
    pub faces: BlockFaces,
}

/// A registered voxel mesh rule.
///
/// New kinds need both a variant here and a dispatch arm in chunk
/// generation; matching stays exhaustive so neither can be forgotten.
#[derive(Clone, Debug)]
pub enum VoxelMesh {
    Block(BlockVoxelMesh),
}

impl VoxelMesh {
    pub fn material_id(&self) -> i32 {
        match self {
            VoxelMesh::Block(block) => block.material_id,
        }
    }

    pub fn opening_state(&self) -> OpeningState {
        match self {
            VoxelMesh::Block(block) => block.opening_state,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opening_state().is_transparent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_mask_bits_are_distinct() {
        let mut seen = 0u8;
        for face in BlockFace::DIRECTIONS {
            let bit = face.mask_bit();
            assert_eq!(bit.count_ones(), 1);
            assert_eq!(seen & bit, 0);
            seen |= bit;
        }
        assert_eq!(seen, 0b11_1111);
        assert_eq!(BlockFace::Center.mask_bit(), 0);
        assert_eq!(BlockFace::PositiveX.mask_bit(), 1);
        assert_eq!(BlockFace::NegativeZ.mask_bit(), 32);
    }

    #[test]
    fn test_opposite_offsets_cancel() {
        for face in BlockFace::ALL {
            assert_eq!(face.offset() + face.opposite().offset(), IVec3::ZERO);
            assert_eq!(face.opposite().opposite(), face);
        }
    }

    #[test]
    fn test_opening_state() {
        assert!(!OpeningState::Closed.is_transparent());
        assert!(OpeningState::Transparent.is_transparent());
        assert!(OpeningState::Open.is_transparent());
        assert_eq!(OpeningState::from(true), OpeningState::Transparent);
        assert_eq!(OpeningState::from(false), OpeningState::Closed);
    }

    #[test]
    fn test_block_faces_slots() {
        let quad = Arc::new(MeshBuffer::new());
        let faces = BlockFaces::new()
            .with(BlockFace::Center, quad.clone())
            .with(BlockFace::NegativeY, quad.clone());
        assert_eq!(faces.len(), 2);
        assert!(faces.get(BlockFace::PositiveX).is_none());
        let filled: Vec<_> = faces.iter().map(|(face, _)| face).collect();
        assert_eq!(filled, vec![BlockFace::Center, BlockFace::NegativeY]);
        assert_eq!(Arc::strong_count(&quad), 3);
    }

    #[test]
    fn test_placement_applies_template_transform_first() {
        let template = FaceTemplate::transformed(
            Arc::new(MeshBuffer::new()),
            Mat4::from_scale(Vec3::splat(0.5)),
        );
        let m = template.placement(Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(m.transform_point3(Vec3::ONE), Vec3::new(2.5, 0.5, 0.5));

        let plain = FaceTemplate::new(Arc::new(MeshBuffer::new()));
        assert_eq!(plain.placement(Vec3::Y).transform_point3(Vec3::ZERO), Vec3::Y);
    }

    #[test]
    fn test_opening_state_serde() {
        let state: OpeningState = serde_json::from_str("\"open\"").unwrap();
        assert_eq!(state, OpeningState::Open);
    }
}
