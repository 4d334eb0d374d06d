//! Issuer configuration.

use crate::crypto::checksum::ChecksumScheme;
use crate::LicenseError;

/// Configuration for a [`LicenseIssuer`](crate::LicenseIssuer).
///
/// The default configuration uses the unkeyed MD5 checksum, which keeps
/// keys interchangeable with every previously issued key.
#[derive(Debug, Clone, Default)]
pub struct IssuerConfig {
    /// Checksum scheme for issuing and verifying keys.
    /// Issuer and verifier must agree on it.
    pub checksum: ChecksumScheme,
}

impl IssuerConfig {
    /// Configuration using a keyed HMAC-SHA256 checksum.
    pub fn with_hmac_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            checksum: ChecksumScheme::HmacSha256 {
                secret: secret.into(),
            },
        }
    }

    /// Validate configuration for obvious errors.
    pub fn validate(&self) -> Result<(), LicenseError> {
        if let ChecksumScheme::HmacSha256 { secret } = &self.checksum {
            if secret.is_empty() {
                return Err(LicenseError::ConfigError(
                    "hmac secret cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
