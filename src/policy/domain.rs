//! Domain name syntax check.
//!
//! Purely syntactic; no DNS lookup. Accepted shape:
//! - a leading label of 3 to 63 characters, alphanumeric at both ends and
//!   alphanumeric or `-` in between
//! - one or more `.`-separated suffix segments of 2+ ASCII letters
//!   (`example.com`, `example.co.uk`)

use crate::errors::{LicenseError, LicenseResult};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;

static DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9](\.[a-zA-Z]{2,})+$")
        .expect("static domain pattern")
});

/// Whether `domain` matches the accepted grammar.
pub fn is_valid_domain(domain: &str) -> bool {
    DOMAIN_RE.is_match(domain)
}

/// Check a domain, returning `InvalidDomain` on rejection.
pub fn validate_domain(domain: &str) -> LicenseResult<()> {
    if !is_valid_domain(domain) {
        debug!(domain, "domain rejected");
        return Err(LicenseError::InvalidDomain {
            domain: domain.to_string(),
        });
    }
    Ok(())
}
