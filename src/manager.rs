//! License Issuer - the main public API for Domainlock.
//!
//! The `LicenseIssuer` wires the validators, hardware id provider, key
//! generator and checksum codec together:
//! - `generate`: validate inputs, bind them to this machine, emit a full key
//! - `verify`: split a full key and check its checksum suffix

use crate::clock::{Clock, SystemClock};
use crate::config::IssuerConfig;
use crate::crypto::checksum::ChecksumCodec;
use crate::crypto::core_key::KeyGenerator;
use crate::hardware::{HardwareIdProvider, SystemHardwareId};
use crate::policy::domain::validate_domain;
use crate::policy::expiration::validate_expiration;
use crate::protocol::key::LicenseKey;
use crate::LicenseError;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of a successful key verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// Whether the checksum matched.
    pub valid: bool,

    /// The salt part of the key.
    pub salt: String,

    /// The digest part of the key.
    pub digest: String,

    /// The checksum part of the key.
    pub checksum: String,

    /// Whether every part has its fixed length and lowercase hex alphabet.
    /// Informational; it does not affect `valid`.
    pub canonical: bool,
}

/// Main license issuer for Domainlock.
///
/// Holds no mutable state, so one instance can serve any number of
/// generate and verify calls, from any thread.
pub struct LicenseIssuer {
    config: IssuerConfig,
    clock: Arc<dyn Clock>,
    hardware: Arc<dyn HardwareIdProvider>,
    codec: ChecksumCodec,
}

impl LicenseIssuer {
    /// Create a new issuer with the given configuration.
    ///
    /// Uses the system clock and the platform hardware id.
    ///
    /// # Errors
    /// Returns an error if configuration validation fails.
    pub fn new(config: IssuerConfig) -> Result<Self, LicenseError> {
        Self::with_hardware_id(config, Arc::new(SystemHardwareId))
    }

    /// Create an issuer that binds keys to a caller-supplied hardware id source.
    ///
    /// # Errors
    /// Returns an error if configuration validation fails.
    pub fn with_hardware_id(
        config: IssuerConfig,
        hardware: Arc<dyn HardwareIdProvider>,
    ) -> Result<Self, LicenseError> {
        Self::with_parts(config, Arc::new(SystemClock), hardware)
    }

    /// Create an issuer with a custom clock (for testing).
    #[cfg(any(test, feature = "test-seams"))]
    pub fn new_with_clock(
        config: IssuerConfig,
        clock: Arc<dyn Clock>,
        hardware: Arc<dyn HardwareIdProvider>,
    ) -> Result<Self, LicenseError> {
        Self::with_parts(config, clock, hardware)
    }

    fn with_parts(
        config: IssuerConfig,
        clock: Arc<dyn Clock>,
        hardware: Arc<dyn HardwareIdProvider>,
    ) -> Result<Self, LicenseError> {
        config.validate()?;
        let codec = ChecksumCodec::new(config.checksum.clone());

        Ok(Self {
            config,
            clock,
            hardware,
            codec,
        })
    }

    /// Generate a full license key.
    ///
    /// Steps, stopping at the first failure:
    /// 1. Check the domain syntax
    /// 2. Check the expiration date is well-formed and in the future
    /// 3. Read the hardware id
    /// 4. Derive the salted core key
    /// 5. Append the checksum
    ///
    /// # Errors
    /// - `InvalidDomain` - Domain failed the syntax check
    /// - `InvalidExpiration` - Date malformed, not a date, or not in the future
    /// - `HardwareIdUnavailable` - Hardware id could not be read
    /// - `KeyGeneration` - Randomness source failed
    pub fn generate(&self, domain: &str, expire: &str) -> Result<String, LicenseError> {
        validate_domain(domain)?;
        validate_expiration(expire, self.clock.as_ref())?;

        let hardware_id = self.hardware.current_id()?;

        let core = KeyGenerator::new().generate_core_key(domain, expire, &hardware_id)?;
        let full_key = self.codec.add_checksum(&core.to_string());

        info!(domain, expire, "license key issued");
        Ok(full_key)
    }

    /// Verify a full license key's checksum.
    ///
    /// Surrounding whitespace is ignored. Only the key's internal
    /// consistency is checked; the domain, expiration and hardware id it
    /// was issued for cannot be recovered from it.
    ///
    /// # Errors
    /// - `MalformedKey` - Not exactly three `.`-separated parts
    /// - `ChecksumMismatch` - Three parts, but the checksum does not match
    pub fn verify(&self, full_key: &str) -> Result<VerificationReport, LicenseError> {
        let key = LicenseKey::split(full_key.trim())?;

        if !self.codec.matches(&key) {
            warn!("license key checksum mismatch");
            return Err(LicenseError::ChecksumMismatch);
        }

        let canonical = key.is_canonical();
        if !canonical {
            debug!("license key verified but is not in canonical form");
        }

        Ok(VerificationReport {
            valid: true,
            salt: key.salt().to_string(),
            digest: key.digest().to_string(),
            checksum: key.checksum().to_string(),
            canonical,
        })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &IssuerConfig {
        &self.config
    }
}
