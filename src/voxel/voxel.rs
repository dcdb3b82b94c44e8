//! Voxel data type
//!
//! The engine treats a voxel as an opaque fixed-size byte record. Game code
//! decides the layout; the meshing core only ever looks at bit fields via
//! [`BitCondition`](crate::condition::BitCondition).

use bytemuck::{Pod, Zeroable};

use crate::condition::bit_condition::{extract_bits, MAX_CONDITION_BITS};

/// Size of a single voxel record in bytes
pub const VOXEL_SIZE: usize = 16;

/// Number of addressable bits in a voxel record
pub const VOXEL_BITS: u32 = (VOXEL_SIZE * 8) as u32;

/// Single voxel - exactly [`VOXEL_SIZE`] bytes
///
/// Bit `i` of the record is bit `i % 8` (least significant first) of byte `i / 8`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Voxel {
    pub bytes: [u8; VOXEL_SIZE],
}

impl Voxel {
    /// All-zero voxel, returned for reads outside a volume
    pub const ZERO: Voxel = Voxel { bytes: [0; VOXEL_SIZE] };

    /// Create voxel from raw bytes
    pub fn from_bytes(bytes: [u8; VOXEL_SIZE]) -> Self {
        Self { bytes }
    }

    /// Create a voxel whose first byte is `value` and the rest zero
    pub fn with_first_byte(value: u8) -> Self {
        let mut voxel = Self::ZERO;
        voxel.bytes[0] = value;
        voxel
    }

    /// Raw record bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Check if every byte is zero
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Read `length` bits starting at bit `offset`.
    ///
    /// Returns `None` if the field leaves the record or is wider than 32 bits.
    pub fn get_bits(&self, offset: u32, length: u32) -> Option<u32> {
        extract_bits(&self.bytes, offset, length)
    }

    /// Write the low `length` bits of `value` starting at bit `offset`.
    ///
    /// Returns false (leaving the voxel untouched) if the field leaves the
    /// record or is wider than 32 bits.
    pub fn set_bits(&mut self, offset: u32, length: u32, value: u32) -> bool {
        if length > MAX_CONDITION_BITS {
            return false;
        }
        match offset.checked_add(length) {
            Some(end) if end <= VOXEL_BITS => {}
            _ => return false,
        }
        for i in 0..length {
            let bit = offset + i;
            let byte = &mut self.bytes[(bit / 8) as usize];
            let mask = 1u8 << (bit % 8);
            if (value >> i) & 1 != 0 {
                *byte |= mask;
            } else {
                *byte &= !mask;
            }
        }
        true
    }

    /// Builder form of [`Voxel::set_bits`]; out-of-range fields are ignored
    pub fn with_bits(mut self, offset: u32, length: u32, value: u32) -> Self {
        self.set_bits(offset, length, value);
        self
    }
}
