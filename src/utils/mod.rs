//! Utility helpers for working with walker value objects.

pub mod buckets;
pub mod constants;

pub use buckets::*;
pub use constants::*;
