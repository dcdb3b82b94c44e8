//! Chunk mesh generator configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::condition::BitCondition;
use crate::core::{Error, Result};
use crate::meshing::templates;
use crate::meshing::voxel_mesh::{BlockFaces, OpeningState};

/// Built-in geometry a config-declared block mesh uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockTemplate {
    /// Six culled cube faces
    #[default]
    Cube,
    /// Two diagonal quads drawn while any neighbor is see-through
    Cross,
}

impl BlockTemplate {
    pub fn faces(self) -> BlockFaces {
        match self {
            BlockTemplate::Cube => templates::cube_faces(),
            BlockTemplate::Cross => templates::cross_faces(),
        }
    }
}

/// A block voxel mesh declared in data rather than code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockMeshConfig {
    pub material_id: i32,
    #[serde(default)]
    pub opening_state: OpeningState,
    #[serde(default)]
    pub conditions: Vec<BitCondition>,
    #[serde(default)]
    pub template: BlockTemplate,
}

/// Configuration for a [`MeshChunkGenerator`](super::MeshChunkGenerator).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Maximum number of registered voxel meshes. `None` = unbounded.
    pub max_voxel_meshes: Option<usize>,
    /// Largest padded environment (voxels) a single generation call may build.
    pub max_region_voxels: u64,
    /// Block meshes registered by `MeshChunkGenerator::from_config`.
    pub block_meshes: Vec<BlockMeshConfig>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_voxel_meshes: Some(8),
            max_region_voxels: 256 * 256 * 256,
            block_meshes: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Parse from a JSON string; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Save as pretty-printed JSON, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject settings that would make the generator unusable
    pub fn validate(&self) -> Result<()> {
        if self.max_region_voxels < 27 {
            return Err(Error::Config(format!(
                "max_region_voxels = {} can't hold a single padded voxel (27)",
                self.max_region_voxels
            )));
        }
        if let Some(limit) = self.max_voxel_meshes {
            if self.block_meshes.len() > limit {
                return Err(Error::Config(format!(
                    "{} block meshes declared but max_voxel_meshes is {}",
                    self.block_meshes.len(), limit
                )));
            }
        }
        Ok(())
    }
}
