//! # Domainlock
//!
//! **Offline license keys bound to a domain, an expiration date and a machine.**
//!
//! Domainlock issues keys of the form
//!
//! ```text
//! <salt:32 hex>.<digest:64 hex>.<checksum:8 hex>
//! ```
//!
//! where `digest = SHA256(salt-domain-expire-hardware_id)` and the checksum
//! covers `salt.digest`. Keys are 106 characters long.
//!
//! ## Features
//!
//! - **Strict input gates** — domain grammar and `YYYY-MM-DD` future dates
//!   are checked before anything is hashed
//! - **Salted one-way digest** — every key gets 16 fresh bytes from the OS
//!   CSPRNG, so identical inputs never repeat a key
//! - **Integrity checksum** — truncated MD5 (compatible) or HMAC-SHA256
//!   (keyed) over the core key
//! - **Pluggable seams** — clock and hardware id are traits
//!
//! ## Quickstart
//!
//! ```no_run
//! use domainlock::{IssuerConfig, LicenseIssuer};
//!
//! fn main() -> Result<(), domainlock::LicenseError> {
//!     let issuer = LicenseIssuer::new(IssuerConfig::default())?;
//!
//!     let key = issuer.generate("example.com", "2099-12-31")?;
//!     let report = issuer.verify(&key)?;
//!     assert!(report.valid);
//!     Ok(())
//! }
//! ```
//!
//! ## Threat Model
//!
//! Verification proves a key was not corrupted or truncated. With the
//! default MD5 checksum it does **not** prove a key was issued by you:
//! the algorithm is public and unkeyed, so anyone can build a key that
//! verifies. Configure [`IssuerConfig::with_hmac_secret`] when forgery
//! matters and compatibility with earlier keys does not.
//!
//! A key never reveals its domain, expiration or hardware id. Checking
//! that a key belongs to a given triple requires knowing the triple and
//! recomputing the digest from the key's salt.

#![deny(warnings)]
#![deny(missing_docs)]

// Core modules
pub mod clock;
pub mod config;
pub mod errors;

// Crypto layer
pub mod crypto;

// Protocol layer
pub mod protocol;

// Platform layer
pub mod hardware;

// Policy layer
pub mod policy;

// Manager (main public API)
pub mod manager;

// Re-exports for public API
pub use clock::{Clock, SystemClock};
pub use config::IssuerConfig;
pub use crypto::checksum::{ChecksumCodec, ChecksumScheme};
pub use crypto::core_key::KeyGenerator;
pub use errors::{ExpirationRejection, LicenseError, LicenseResult};
pub use hardware::{FixedHardwareId, HardwareIdProvider, SystemHardwareId};
pub use manager::{LicenseIssuer, VerificationReport};
pub use policy::domain::is_valid_domain;
pub use policy::expiration::is_valid_expiration_date;
pub use protocol::key::{CoreKey, LicenseKey};

#[cfg(any(test, feature = "test-seams"))]
pub use clock::MockClock;
