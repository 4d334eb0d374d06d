//! Pre-generation input checks.

pub mod domain;
pub mod expiration;
