//! Expiration date check.
//!
//! The input must be literally `YYYY-MM-DD`, name a real calendar date,
//! and lie strictly after the current local time. The date stands for
//! local midnight at the start of that day, so today's date never passes.

use crate::clock::Clock;
use crate::errors::{ExpirationRejection, LicenseError, LicenseResult};
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;

/// `strftime` form of the accepted date layout.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// chrono alone would accept `2025-1-5`; the pattern pins the width.
static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("static date pattern"));

/// Whether `s` is a well-formed date strictly in the future.
pub fn is_valid_expiration_date<C: Clock + ?Sized>(s: &str, clock: &C) -> bool {
    validate_expiration(s, clock).is_ok()
}

/// Check an expiration date and return the parsed date.
///
/// # Errors
/// * `InvalidExpiration { reason: Format }` - Not `YYYY-MM-DD`
/// * `InvalidExpiration { reason: Calendar }` - No such date
/// * `InvalidExpiration { reason: NotInFuture }` - At or before now
pub fn validate_expiration<C: Clock + ?Sized>(s: &str, clock: &C) -> LicenseResult<NaiveDate> {
    let reject = |reason: ExpirationRejection| {
        debug!(value = s, %reason, "expiration rejected");
        LicenseError::InvalidExpiration {
            value: s.to_string(),
            reason,
        }
    };

    if !DATE_RE.is_match(s) {
        return Err(reject(ExpirationRejection::Format));
    }

    let date = NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| reject(ExpirationRejection::Calendar))?;

    let expires_at = date.and_time(NaiveTime::default());
    if expires_at <= clock.now().naive_local() {
        return Err(reject(ExpirationRejection::NotInFuture));
    }

    Ok(date)
}
