// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record id generation.
//!
//! Ids are assigned once at creation by the caller; the store performs no
//! uniqueness check of its own.

use uuid::Uuid;

/// Generate a globally unique record id from a cryptographically strong
/// random source.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Degraded-host fallback: current time plus random bits, base-36 encoded.
///
/// Not cryptographically strong, but sufficiently unique for a single-user
/// list. Used where a UUID source is unavailable.
pub fn fallback_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis().unsigned_abs();
    let noise: u64 = rand::random();
    format!("{}{}", to_base36(millis), to_base36(noise))
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
