//! Single bit-field conditions.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Widest bit field a condition can test
pub const MAX_CONDITION_BITS: u32 = 32;

/// Read `length` bits of `record` starting at bit `offset`.
///
/// Bit `i` is bit `i % 8` (least significant first) of byte `i / 8`.
/// Returns `None` if the field reaches past the record or is wider than
/// [`MAX_CONDITION_BITS`].
pub fn extract_bits(record: &[u8], offset: u32, length: u32) -> Option<u32> {
    if length > MAX_CONDITION_BITS {
        return None;
    }
    let end = offset.checked_add(length)?;
    if end as u64 > record.len() as u64 * 8 {
        return None;
    }
    if length == 0 {
        return Some(0);
    }

    // At most 5 bytes: 7 bits of leading shift + 32 bits of field.
    let first = (offset / 8) as usize;
    let last = ((end - 1) / 8) as usize;
    let mut window = 0u64;
    for (i, &byte) in record[first..=last].iter().enumerate() {
        window |= (byte as u64) << (i * 8);
    }
    let mask = (1u64 << length) - 1;
    Some(((window >> (offset % 8)) & mask) as u32)
}

/// Requires the `length` bits at bit `offset` of a record to equal `value`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitCondition {
    /// Position in the bit field
    pub offset: u32,
    /// Amount of bits extracted for comparison
    pub length: u32,
    /// Value the extracted bits are compared to
    pub value: u32,
}

impl BitCondition {
    pub fn new(offset: u32, length: u32, value: u32) -> Self {
        Self { offset, length, value }
    }

    /// Condition on a whole byte of the record
    pub fn byte(index: u32, value: u8) -> Self {
        Self::new(index * 8, 8, value as u32)
    }

    /// Condition on a single bit
    pub fn flag(offset: u32, set: bool) -> Self {
        Self::new(offset, 1, set as u32)
    }

    /// Test this condition against a raw record.
    ///
    /// A zero-length condition holds for any record it fits in. A condition
    /// reaching past the end of the record never holds.
    pub fn matches(&self, record: &[u8]) -> bool {
        match extract_bits(record, self.offset, self.length) {
            Some(_) if self.length == 0 => true,
            Some(bits) => bits == self.value,
            None => false,
        }
    }

    /// Check that the condition can ever hold for a record of `record_bits` bits.
    pub fn validate(&self, record_bits: u32) -> Result<()> {
        if self.length > MAX_CONDITION_BITS {
            return Err(Error::InvalidCondition(format!(
                "{:?}: length exceeds {} bits", self, MAX_CONDITION_BITS
            )));
        }
        if self.length < MAX_CONDITION_BITS && self.value >> self.length != 0 {
            return Err(Error::InvalidCondition(format!(
                "{:?}: value doesn't fit in {} bits", self, self.length
            )));
        }
        match self.offset.checked_add(self.length) {
            Some(end) if end <= record_bits => Ok(()),
            _ => Err(Error::InvalidCondition(format!(
                "{:?}: field ends past the {}-bit record", self, record_bits
            ))),
        }
    }
}
