//! Salted core key construction.
//!
//! ```text
//! salt   = hex(16 random bytes)
//! digest = hex(SHA256(salt "-" domain "-" expire "-" hardware_id))
//! core   = salt "." digest
//! ```
//!
//! Fields are joined with a bare `-` and no length prefixes. Changing that
//! would change every digest, so the preimage is kept exactly as issued.

use crate::crypto::digest::sha256_hex;
use crate::errors::{LicenseError, LicenseResult};
use crate::protocol::key::CoreKey;
use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random salt bytes.
pub const SALT_BYTES: usize = 16;

/// Separator between preimage fields.
pub const FIELD_SEPARATOR: &str = "-";

/// Draw a fresh salt from `rng` as lowercase hex.
///
/// # Errors
/// * `KeyGeneration` - The randomness source failed.
pub fn generate_salt<R: RngCore + ?Sized>(rng: &mut R) -> LicenseResult<String> {
    let mut bytes = [0u8; SALT_BYTES];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| LicenseError::KeyGeneration(format!("randomness source failed: {}", e)))?;
    Ok(hex::encode(bytes))
}

/// Build the digest preimage for a salt and the three bound fields.
pub fn digest_preimage(salt: &str, domain: &str, expire: &str, hardware_id: &str) -> String {
    [salt, domain, expire, hardware_id].join(FIELD_SEPARATOR)
}

/// Salted SHA-256 over the bound fields, hex-encoded.
pub fn core_digest(salt: &str, domain: &str, expire: &str, hardware_id: &str) -> String {
    sha256_hex(digest_preimage(salt, domain, expire, hardware_id).as_bytes())
}

/// Generates core keys with a pluggable randomness source.
#[derive(Debug, Default)]
pub struct KeyGenerator<R = OsRng> {
    rng: R,
}

impl KeyGenerator<OsRng> {
    /// Generator backed by the operating system CSPRNG.
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl<R: RngCore> KeyGenerator<R> {
    /// Generator backed by a custom randomness source.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a core key binding `domain`, `expire` and `hardware_id`.
    ///
    /// Every call draws a new salt, so identical inputs never produce the
    /// same key twice.
    ///
    /// # Errors
    /// * `KeyGeneration` - The randomness source failed.
    pub fn generate_core_key(
        &mut self,
        domain: &str,
        expire: &str,
        hardware_id: &str,
    ) -> LicenseResult<CoreKey> {
        let salt = generate_salt(&mut self.rng)?;
        let digest = core_digest(&salt, domain, expire, hardware_id);
        Ok(CoreKey::new(salt, digest))
    }
}
