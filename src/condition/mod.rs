//! Bit-condition matching.
//!
//! A [`ConditionSolver`] stores payloads under ordered sequences of
//! [`BitCondition`]s and, given a raw voxel record, gathers every payload
//! whose whole sequence holds for that record.

pub mod bit_condition;
pub mod solver;

pub use bit_condition::{extract_bits, BitCondition, MAX_CONDITION_BITS};
pub use solver::{ConditionSolver, NodeId};
