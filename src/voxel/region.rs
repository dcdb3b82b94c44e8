//! Rectangular voxel regions processed by one chunk generation call.

use crate::core::types::{IVec3, UVec3};

/// A box of voxels: `origin` is the minimum corner, `size` the extent per axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkRegion {
    pub origin: IVec3,
    pub size: UVec3,
}

impl ChunkRegion {
    /// Create a region from origin and extent
    pub fn new(origin: IVec3, size: UVec3) -> Self {
        Self { origin, size }
    }

    /// Create a region from the flat `(x, y, z, w, h, d)` form scripts pass around
    pub fn from_xyzwhd(x: i32, y: i32, z: i32, w: u32, h: u32, d: u32) -> Self {
        Self::new(IVec3::new(x, y, z), UVec3::new(w, h, d))
    }

    /// Cubic region of `size` voxels per side at chunk coordinate `coord`.
    ///
    /// An origin past the `i32` range saturates; such a region never passes
    /// [`ChunkRegion::padded_fits_i32`].
    pub fn cube(coord: IVec3, size: u32) -> Self {
        let axis = |c: i32| (c as i64 * size as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32;
        Self::new(
            IVec3::new(axis(coord.x), axis(coord.y), axis(coord.z)),
            UVec3::splat(size),
        )
    }

    /// Number of voxels in the region, `None` if it overflows `u64`
    pub fn voxel_count(&self) -> Option<u64> {
        (self.size.x as u64)
            .checked_mul(self.size.y as u64)?
            .checked_mul(self.size.z as u64)
    }

    /// Check if the region holds no voxels
    pub fn is_empty(&self) -> bool {
        self.size.x == 0 || self.size.y == 0 || self.size.z == 0
    }

    /// Extent of the padded environment (one voxel halo on every side)
    pub fn padded_size(&self) -> [u64; 3] {
        [
            self.size.x as u64 + 2,
            self.size.y as u64 + 2,
            self.size.z as u64 + 2,
        ]
    }

    /// Voxel count of the padded environment, `None` if it overflows `u64`
    pub fn padded_voxel_count(&self) -> Option<u64> {
        let [w, h, d] = self.padded_size();
        w.checked_mul(h)?.checked_mul(d)
    }

    /// Check that every padded coordinate fits in `i32`
    pub fn padded_fits_i32(&self) -> bool {
        let axes = [
            (self.origin.x, self.size.x),
            (self.origin.y, self.size.y),
            (self.origin.z, self.size.z),
        ];
        axes.iter().all(|&(origin, size)| {
            let min = origin as i64 - 1;
            let max = origin as i64 + size as i64;
            min >= i32::MIN as i64 && max <= i32::MAX as i64
        })
    }
}
