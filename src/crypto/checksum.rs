//! Checksum suffix appended to core keys.
//!
//! The default scheme is the first 8 hex characters of an unsalted MD5
//! over `salt.digest`. It detects corruption and truncation only: anyone
//! who knows the algorithm can compute a matching suffix. The keyed
//! HMAC-SHA256 scheme produces the same 8-character wire format but
//! cannot be recomputed without the secret.

use crate::crypto::digest::md5_hex;
use crate::errors::LicenseResult;
use crate::protocol::key::{is_lower_hex, LicenseKey, CHECKSUM_HEX_LEN, DELIMITER};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Algorithm used to compute the checksum suffix.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum ChecksumScheme {
    /// Truncated unsalted MD5. Compatible with previously issued keys.
    #[default]
    Md5,
    /// Truncated HMAC-SHA256 under a held secret.
    HmacSha256 {
        /// Shared secret held by issuer and verifier.
        secret: Vec<u8>,
    },
}

// Keep the secret out of logs and panic messages.
impl fmt::Debug for ChecksumScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Md5 => f.write_str("Md5"),
            Self::HmacSha256 { .. } => f.write_str("HmacSha256 { secret: <redacted> }"),
        }
    }
}

/// Computes, appends and checks key checksums.
#[derive(Debug, Clone, Default)]
pub struct ChecksumCodec {
    scheme: ChecksumScheme,
}

impl ChecksumCodec {
    /// Codec for the given scheme.
    pub fn new(scheme: ChecksumScheme) -> Self {
        Self { scheme }
    }

    /// The scheme in use.
    pub fn scheme(&self) -> &ChecksumScheme {
        &self.scheme
    }

    /// Checksum of `data`: 8 lowercase hex characters.
    pub fn checksum(&self, data: &str) -> String {
        match &self.scheme {
            ChecksumScheme::Md5 => {
                let mut hex = md5_hex(data.as_bytes());
                hex.truncate(CHECKSUM_HEX_LEN);
                hex
            }
            ChecksumScheme::HmacSha256 { secret } => {
                let tag = keyed_mac(secret, data).finalize().into_bytes();
                hex::encode(&tag[..CHECKSUM_HEX_LEN / 2])
            }
        }
    }

    /// Append `.checksum` to a serialized core key.
    pub fn add_checksum(&self, core_key: &str) -> String {
        format!("{}{}{}", core_key, DELIMITER, self.checksum(core_key))
    }

    /// Check a full key's checksum suffix.
    ///
    /// # Returns
    /// * `Ok(true)` - The suffix matches the recomputed checksum
    /// * `Ok(false)` - Three parts, but the suffix does not match
    /// * `Err(MalformedKey)` - The key does not have exactly three parts
    pub fn verify_checksum(&self, full_key: &str) -> LicenseResult<bool> {
        let key = LicenseKey::split(full_key)?;
        Ok(self.matches(&key))
    }

    /// Whether an already split key carries a matching checksum.
    pub fn matches(&self, key: &LicenseKey) -> bool {
        let core = key.core();
        match &self.scheme {
            ChecksumScheme::Md5 => self.checksum(&core) == key.checksum(),
            ChecksumScheme::HmacSha256 { secret } => {
                // Exact lowercase form first, so both schemes agree on what
                // "equal" means; the tag compare itself is constant-time.
                if !is_lower_hex(key.checksum(), CHECKSUM_HEX_LEN) {
                    return false;
                }
                let Ok(tag) = hex::decode(key.checksum()) else {
                    return false;
                };
                keyed_mac(secret, &core).verify_truncated_left(&tag).is_ok()
            }
        }
    }
}

fn keyed_mac(secret: &[u8], data: &str) -> HmacSha256 {
    let Ok(mut mac) = <HmacSha256 as Mac>::new_from_slice(secret) else {
        unreachable!("HMAC accepts keys of any length");
    };
    mac.update(data.as_bytes());
    mac
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LicenseError;

    const CORE: &str = "00112233445566778899aabbccddeeff.\
                        e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn hmac_codec(secret: &[u8]) -> ChecksumCodec {
        ChecksumCodec::new(ChecksumScheme::HmacSha256 {
            secret: secret.to_vec(),
        })
    }

    #[test]
    fn test_md5_checksum_is_truncated_md5() {
        let codec = ChecksumCodec::default();
        // MD5("abc") = 900150983cd24fb0d6963f7d28e17f72
        assert_eq!(codec.checksum("abc"), "90015098");
    }

    #[test]
    fn test_checksum_is_deterministic() {
        let codec = ChecksumCodec::default();
        assert_eq!(codec.checksum(CORE), codec.checksum(CORE));
    }

    #[test]
    fn test_add_checksum_appends_suffix() {
        let codec = ChecksumCodec::default();
        let full = codec.add_checksum(CORE);
        assert!(full.starts_with(CORE));
        assert_eq!(full.len(), CORE.len() + 1 + CHECKSUM_HEX_LEN);
        assert_eq!(&full[CORE.len() + 1..], codec.checksum(CORE));
    }

    #[test]
    fn test_add_then_verify() {
        let codec = ChecksumCodec::default();
        let full = codec.add_checksum(CORE);
        assert!(codec.verify_checksum(&full).unwrap());
    }

    #[test]
    fn test_verify_wrong_checksum() {
        let codec = ChecksumCodec::default();
        let full = format!("{}.00000000", CORE);
        assert!(!codec.verify_checksum(&full).unwrap());
    }

    #[test]
    fn test_verify_deadbeef_is_mismatch_not_malformed() {
        let result = ChecksumCodec::default().verify_checksum("deadbeef.cafebabe.00000000");
        assert!(matches!(result, Ok(false)));
    }

    #[test]
    fn test_verify_two_parts_is_malformed() {
        let result = ChecksumCodec::default().verify_checksum("deadbeef.cafebabe");
        assert!(matches!(result, Err(LicenseError::MalformedKey { parts: 2 })));
    }

    #[test]
    fn test_verify_four_parts_is_malformed() {
        let codec = ChecksumCodec::default();
        let full = format!("{}.extra", codec.add_checksum(CORE));
        let result = codec.verify_checksum(&full);
        assert!(matches!(result, Err(LicenseError::MalformedKey { parts: 4 })));
    }

    #[test]
    fn test_hmac_checksum_shape() {
        let sum = hmac_codec(b"secret").checksum(CORE);
        assert!(is_lower_hex(&sum, CHECKSUM_HEX_LEN));
    }

    #[test]
    fn test_hmac_add_then_verify() {
        let codec = hmac_codec(b"secret");
        let full = codec.add_checksum(CORE);
        assert!(codec.verify_checksum(&full).unwrap());
    }

    #[test]
    fn test_hmac_wrong_secret_rejected() {
        let full = hmac_codec(b"secret").add_checksum(CORE);
        assert!(!hmac_codec(b"other").verify_checksum(&full).unwrap());
    }

    #[test]
    fn test_hmac_key_rejected_by_md5_codec() {
        let codec = hmac_codec(b"secret");
        let full = codec.add_checksum(CORE);
        assert!(!ChecksumCodec::default().verify_checksum(&full).unwrap());
    }

    #[test]
    fn test_hmac_non_hex_suffix_rejected() {
        let codec = hmac_codec(b"secret");
        let full = format!("{}.zzzzzzzz", CORE);
        assert!(!codec.verify_checksum(&full).unwrap());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let scheme = ChecksumScheme::HmacSha256 {
            secret: b"hunter2".to_vec(),
        };
        assert!(!format!("{:?}", scheme).contains("hunter2"));
    }
}
