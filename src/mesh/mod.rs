//! CPU-side geometry buffers.
//!
//! Meshing only ever appends and transforms these; uploading them to the
//! GPU is the renderer's job.

pub mod vertex;
pub mod buffer;

pub use vertex::{Vertex, VertexIndex};
pub use buffer::MeshBuffer;
