//! Hashing, salting and checksum primitives for license keys.

pub mod checksum;
pub mod core_key;
pub mod digest;
