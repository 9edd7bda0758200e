//! Bearer token expiry
//!
//! The token is opaque apart from its `exp` claim. The signature is never
//! checked here; the remote API stays the authority on whether a token is
//! genuine.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
const STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

#[derive(Debug, Deserialize)]
struct ExpiryClaim {
    /// Seconds since the epoch, possibly fractional
    exp: f64,
}

/// Read the `exp` claim as (possibly fractional) milliseconds since the epoch.
///
/// Claims outside the range a `DateTime<Utc>` can hold are rejected.
fn expiry_millis(token: &str) -> Option<f64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE
        .decode(payload)
        .or_else(|_| STANDARD.decode(payload))
        .ok()?;
    let claim: ExpiryClaim = serde_json::from_slice(&bytes).ok()?;

    let millis = claim.exp * 1000.0;
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    Utc.timestamp_millis_opt(millis.floor() as i64).single()?;
    Some(millis)
}

/// Decode the expiry time embedded in a bearer token
pub fn expiry(token: &str) -> Option<DateTime<Utc>> {
    let millis = expiry_millis(token)?;
    Utc.timestamp_millis_opt(millis.floor() as i64).single()
}

/// Whether the token is expired (or unreadable) at `now`.
///
/// A token expiring exactly at `now` counts as expired. Sub-millisecond
/// fractions of the claim are kept in the comparison.
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    match expiry_millis(token) {
        Some(exp) => exp <= now.timestamp_millis() as f64,
        None => true,
    }
}
