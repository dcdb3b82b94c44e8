//! Vertex layout shared with the renderer.

use bytemuck::{Pod, Zeroable};

use crate::core::types::{Vec2, Vec3};

/// Index into a [`MeshBuffer`](super::MeshBuffer)'s vertex list.
///
/// 32-bit so merged chunk meshes can exceed 65535 vertices.
pub type VertexIndex = u32;

/// Single mesh vertex - 68 bytes, tightly packed
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec3,
    pub tex_coord: Vec2,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub bitangent: Vec3,
}

impl Vertex {
    /// White vertex at `position` with no surface frame
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            color: Vec3::ONE,
            ..Default::default()
        }
    }

    /// Set texture coordinates
    pub fn with_tex_coord(mut self, tex_coord: Vec2) -> Self {
        self.tex_coord = tex_coord;
        self
    }

    /// Set normal, tangent and derive the bitangent from them
    pub fn with_frame(mut self, normal: Vec3, tangent: Vec3) -> Self {
        self.normal = normal;
        self.tangent = tangent;
        self.bitangent = normal.cross(tangent);
        self
    }
}
