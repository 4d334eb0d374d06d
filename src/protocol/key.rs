//! License key wire format.
//!
//! A full key is three `.`-separated lowercase hex fields:
//! ```text
//! <salt:32>.<digest:64>.<checksum:8>
//! ```
//! The salt and digest together form the *core key*; the checksum is
//! computed over the core key's serialized form.

use crate::errors::{LicenseError, LicenseResult};
use std::fmt;

/// Field delimiter inside a license key.
pub const DELIMITER: char = '.';

/// Salt length in hex characters (16 random bytes).
pub const SALT_HEX_LEN: usize = 32;

/// Core digest length in hex characters (SHA-256).
pub const DIGEST_HEX_LEN: usize = 64;

/// Checksum length in hex characters (first 4 digest bytes).
pub const CHECKSUM_HEX_LEN: usize = 8;

/// Length of a canonical full license key.
pub const KEY_LEN: usize = SALT_HEX_LEN + 1 + DIGEST_HEX_LEN + 1 + CHECKSUM_HEX_LEN;

/// Salt and digest, before a checksum is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreKey {
    salt: String,
    digest: String,
}

impl CoreKey {
    /// Assemble a core key from its two hex fields.
    pub fn new(salt: String, digest: String) -> Self {
        Self { salt, digest }
    }

    /// The random salt.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// The salted SHA-256 digest.
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl fmt::Display for CoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.salt, DELIMITER, self.digest)
    }
}

/// A full license key split into its three parts.
///
/// Splitting only checks the part count. Use [`LicenseKey::is_canonical`]
/// to additionally check field lengths and alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseKey {
    salt: String,
    digest: String,
    checksum: String,
}

impl LicenseKey {
    /// Split a full key on `.`.
    ///
    /// # Errors
    /// * `MalformedKey` - The key does not have exactly three parts.
    pub fn split(key: &str) -> LicenseResult<Self> {
        let parts: Vec<&str> = key.split(DELIMITER).collect();
        let [salt, digest, checksum] = parts.as_slice() else {
            return Err(LicenseError::MalformedKey { parts: parts.len() });
        };

        Ok(Self {
            salt: (*salt).to_string(),
            digest: (*digest).to_string(),
            checksum: (*checksum).to_string(),
        })
    }

    /// The random salt.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// The salted SHA-256 digest.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// The checksum suffix as supplied.
    pub fn checksum(&self) -> &str {
        &self.checksum
    }

    /// The core key the checksum covers (`salt.digest`).
    pub fn core(&self) -> String {
        format!("{}{}{}", self.salt, DELIMITER, self.digest)
    }

    /// Whether every field has its fixed length and is lowercase hex.
    pub fn is_canonical(&self) -> bool {
        is_lower_hex(&self.salt, SALT_HEX_LEN)
            && is_lower_hex(&self.digest, DIGEST_HEX_LEN)
            && is_lower_hex(&self.checksum, CHECKSUM_HEX_LEN)
    }
}

impl fmt::Display for LicenseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}",
            self.salt,
            self.digest,
            self.checksum,
            d = DELIMITER
        )
    }
}

/// True if `s` is exactly `len` characters of `[0-9a-f]`.
pub fn is_lower_hex(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
