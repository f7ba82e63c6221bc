//! Identifier generation for stored entries.

use chrono::{DateTime, NaiveDate, Utc};
use rand::distributions::Alphanumeric;
use rand::{Rng, thread_rng};
use sha2::{Digest, Sha256};

/// Unique entry id: millisecond timestamp in base 36 plus a random suffix.
pub fn entry_id(now: DateTime<Utc>) -> String {
    let suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    format!("{}{}", to_base36(now.timestamp_millis().max(0) as u64), suffix)
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Content-addressed holiday id.
///
/// Fields are hashed with a `|` separator so names containing hyphens or
/// other punctuation cannot collide; the same source data always yields the
/// same id.
pub fn holiday_id(country: &str, region: &str, date: NaiveDate, name: &str) -> String {
    let key = format!(
        "{}|{}|{}|{}",
        country.to_uppercase(),
        region.to_uppercase(),
        date.format("%Y-%m-%d"),
        name
    );
    let digest = Sha256::digest(key.as_bytes());
    format!("hol_{}", hex::encode(&digest[..8]))
}
