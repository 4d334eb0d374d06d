//! Domainlock error types.

use std::fmt;
use thiserror::Error;

/// Why an expiration date string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpirationRejection {
    /// Not literally `YYYY-MM-DD`.
    Format,
    /// Well-formed but not a real calendar date (e.g. `2025-02-30`).
    Calendar,
    /// A real date, but not strictly after the current moment.
    NotInFuture,
}

impl fmt::Display for ExpirationRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::Format => "expected YYYY-MM-DD",
            Self::Calendar => "not a calendar date",
            Self::NotInFuture => "must be later than now",
        };
        f.write_str(reason)
    }
}

/// Errors that can occur while issuing or verifying license keys.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Domain failed the syntax check. Nothing was hashed.
    #[error("Invalid domain: {domain:?}")]
    InvalidDomain {
        /// The rejected domain.
        domain: String,
    },

    /// Expiration date failed the syntax, calendar or range check.
    #[error("Invalid expiration date {value:?}: {reason}")]
    InvalidExpiration {
        /// The rejected input.
        value: String,
        /// Which check failed.
        reason: ExpirationRejection,
    },

    /// The platform hardware identifier could not be obtained.
    #[error("Hardware id unavailable: {0}")]
    HardwareIdUnavailable(String),

    /// Randomness source or hash primitive failed.
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// Key does not split into exactly three `.`-separated parts.
    #[error("Malformed license key: expected 3 parts, got {parts}")]
    MalformedKey {
        /// Number of parts found.
        parts: usize,
    },

    /// Key is well-shaped but its checksum does not match.
    #[error("License key checksum mismatch")]
    ChecksumMismatch,

    /// A report could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
