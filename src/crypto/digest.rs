//! Hex-encoded SHA-256 and MD5 digests.

use md5::Md5;
use sha2::{Digest, Sha256};

/// Compute SHA-256 of `data` and return 64 lowercase hex characters.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Compute MD5 of `data` and return 32 lowercase hex characters.
pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(Md5::digest(data))
}
