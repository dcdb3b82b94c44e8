//! Apoapsis - voxel engine core: rule-driven chunk meshing with face culling

pub mod core;
pub mod math;
pub mod voxel;
pub mod condition;
pub mod mesh;
pub mod meshing;
