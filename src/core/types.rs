//! glam re-exports used across the crate and the `Result` alias

pub use glam::{
    Vec2, Vec3,
    Mat3, Mat4,
    IVec3, UVec3,
};

/// Result with the crate [`Error`](crate::core::Error)
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
