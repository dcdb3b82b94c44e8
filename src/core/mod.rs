//! Shared math types, the crate error and logging setup

pub mod types;
pub mod error;
pub mod logging;

pub use types::*;
pub use error::Error;
