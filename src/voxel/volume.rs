//! Voxel volumes - the read side consumed by chunk generation.

use std::sync::Arc;

use crate::core::types::UVec3;
use crate::voxel::voxel::Voxel;

/// Read accessor for voxel data.
///
/// Chunk generation intentionally reads one voxel past every region
/// boundary, so implementations must return [`Voxel::ZERO`] for coordinates
/// they don't hold instead of failing.
pub trait VoxelVolume: Send + Sync {
    /// Read the voxel at integer world coordinates.
    fn read_voxel(&self, x: i32, y: i32, z: i32) -> Voxel;
}

impl<V: VoxelVolume + ?Sized> VoxelVolume for Arc<V> {
    fn read_voxel(&self, x: i32, y: i32, z: i32) -> Voxel {
        (**self).read_voxel(x, y, z)
    }
}

impl<V: VoxelVolume + ?Sized> VoxelVolume for &V {
    fn read_voxel(&self, x: i32, y: i32, z: i32) -> Voxel {
        (**self).read_voxel(x, y, z)
    }
}

/// Dense, zero-initialized voxel grid anchored at the origin.
///
/// Voxels are stored in Z-Y-X order (`z * w * h + y * w + x`).
#[derive(Clone, Debug)]
pub struct DenseVolume {
    size: UVec3,
    voxels: Vec<Voxel>,
}

impl DenseVolume {
    /// Create a zero-filled volume
    pub fn new(width: u32, height: u32, depth: u32) -> Self {
        let count = width as usize * height as usize * depth as usize;
        Self {
            size: UVec3::new(width, height, depth),
            voxels: vec![Voxel::ZERO; count],
        }
    }

    /// Volume dimensions
    pub fn size(&self) -> UVec3 {
        self.size
    }

    /// Recreate the volume with the given size; all contents are discarded
    pub fn resize(&mut self, width: u32, height: u32, depth: u32) {
        *self = Self::new(width, height, depth);
    }

    fn index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        let (x, y, z) = (x as u32, y as u32, z as u32);
        if x >= self.size.x || y >= self.size.y || z >= self.size.z {
            return None;
        }
        let (w, h) = (self.size.x as usize, self.size.y as usize);
        Some(z as usize * w * h + y as usize * w + x as usize)
    }

    /// Read a voxel, `None` if out of range
    pub fn read(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        self.index(x, y, z).map(|i| self.voxels[i])
    }

    /// Write a voxel. Returns whether the coordinates were in range.
    pub fn write(&mut self, x: i32, y: i32, z: i32, voxel: Voxel) -> bool {
        match self.index(x, y, z) {
            Some(i) => {
                self.voxels[i] = voxel;
                true
            }
            None => false,
        }
    }

    /// Write `voxel` to every in-range cell of the box `[min, min + size)`.
    ///
    /// Returns the number of voxels written.
    pub fn fill_region(&mut self, min: glam::IVec3, size: UVec3, voxel: Voxel) -> usize {
        let mut written = 0;
        for z in 0..size.z as i32 {
            for y in 0..size.y as i32 {
                for x in 0..size.x as i32 {
                    if self.write(min.x + x, min.y + y, min.z + z, voxel) {
                        written += 1;
                    }
                }
            }
        }
        written
    }

    /// Fill each `(x, z)` column from `y = 0` up to (excluding) `height(x, z)`.
    ///
    /// Returns the number of voxels written.
    pub fn fill_columns(&mut self, height: impl Fn(i32, i32) -> u32, voxel: Voxel) -> usize {
        let mut written = 0;
        for z in 0..self.size.z as i32 {
            for x in 0..self.size.x as i32 {
                let top = height(x, z).min(self.size.y);
                written += self.fill_region(glam::IVec3::new(x, 0, z), UVec3::new(1, top, 1), voxel);
            }
        }
        written
    }
}

impl VoxelVolume for DenseVolume {
    fn read_voxel(&self, x: i32, y: i32, z: i32) -> Voxel {
        self.read(x, y, z).unwrap_or(Voxel::ZERO)
    }
}
