//! Built-in face geometry for block voxel meshes.
//!
//! Every template spans the unit cube `[0, 1]^3`; chunk generation
//! translates it to the voxel's chunk-local position.

use std::sync::Arc;

use crate::core::types::{Vec2, Vec3};
use crate::mesh::{MeshBuffer, Vertex};
use crate::meshing::voxel_mesh::{BlockFace, BlockFaces};

const QUAD_UVS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

fn quad(corners: [Vec3; 4]) -> [Vertex; 4] {
    let normal = (corners[1] - corners[0]).cross(corners[2] - corners[0]).normalize_or_zero();
    let tangent = (corners[1] - corners[0]).normalize_or_zero();
    let mut out = [Vertex::default(); 4];
    for (i, corner) in corners.into_iter().enumerate() {
        out[i] = Vertex::at(corner)
            .with_tex_coord(QUAD_UVS[i])
            .with_frame(normal, tangent);
    }
    out
}

/// Corners of a cube face, counter-clockwise seen from outside.
fn face_corners(face: BlockFace) -> Option<[Vec3; 4]> {
    let v = Vec3::new;
    let corners = match face {
        BlockFace::Center => return None,
        BlockFace::PositiveX => [v(1., 0., 0.), v(1., 1., 0.), v(1., 1., 1.), v(1., 0., 1.)],
        BlockFace::NegativeX => [v(0., 0., 0.), v(0., 0., 1.), v(0., 1., 1.), v(0., 1., 0.)],
        BlockFace::PositiveY => [v(0., 1., 0.), v(0., 1., 1.), v(1., 1., 1.), v(1., 1., 0.)],
        BlockFace::NegativeY => [v(0., 0., 0.), v(1., 0., 0.), v(1., 0., 1.), v(0., 0., 1.)],
        BlockFace::PositiveZ => [v(0., 0., 1.), v(1., 0., 1.), v(1., 1., 1.), v(0., 1., 1.)],
        BlockFace::NegativeZ => [v(0., 0., 0.), v(0., 1., 0.), v(1., 1., 0.), v(1., 0., 0.)],
    };
    Some(corners)
}

/// One face of the unit cube as a quad (4 vertices, 6 indices).
///
/// `Center` has no cube geometry and yields an empty buffer.
pub fn cube_face(face: BlockFace) -> MeshBuffer {
    let mut buffer = MeshBuffer::new();
    if let Some(corners) = face_corners(face) {
        buffer.add_quad(quad(corners));
    }
    buffer
}

/// The six directional faces of the unit cube; `Center` stays empty.
pub fn cube_faces() -> BlockFaces {
    BlockFace::DIRECTIONS
        .into_iter()
        .fold(BlockFaces::new(), |faces, face| faces.with(face, Arc::new(cube_face(face))))
}

/// Two diagonal quads crossing the voxel, as used for plants.
pub fn cross() -> MeshBuffer {
    let v = Vec3::new;
    let mut buffer = MeshBuffer::new();
    buffer.add_quad(quad([v(0., 0., 0.), v(1., 0., 1.), v(1., 1., 1.), v(0., 1., 0.)]));
    buffer.add_quad(quad([v(1., 0., 0.), v(0., 0., 1.), v(0., 1., 1.), v(1., 1., 0.)]));
    buffer
}

/// Cross geometry in the `Center` slot and nothing else
pub fn cross_faces() -> BlockFaces {
    BlockFaces::new().with(BlockFace::Center, Arc::new(cross()))
}
