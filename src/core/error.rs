//! Error types for the Apoapsis engine core

use thiserror::Error;

/// Main error type for the engine core
#[derive(Debug, Error)]
pub enum Error {
    /// The generator's voxel mesh table is full.
    #[error("Can't create more voxel meshes (limit is {limit})")]
    CapacityExceeded { limit: usize },

    #[error("Invalid bit condition: {0}")]
    InvalidCondition(String),

    #[error("Invalid chunk region: {0}")]
    InvalidRegion(String),

    /// A background mesh job stopped before delivering its chunk.
    #[error("Mesh job ended without a result")]
    JobAborted,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
