//! Small shared utilities

use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Current unix time in milliseconds
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Epoch offset: 2024-01-01 00:00:00 UTC
const EPOCH_MS: i64 = 1_704_067_200_000;

/// Generate a time-ordered unique id.
///
/// Layout: 41 bits of milliseconds since 2024-01-01, then 12 random bits.
/// Collisions require two ids in the same millisecond drawing the same
/// random value, which is acceptable for order-number suffixes.
pub fn snowflake_id() -> i64 {
    let ms = (now_millis() - EPOCH_MS) & 0x1FF_FFFF_FFFF;
    let rand_part = rand::thread_rng().gen_range(0..4096) as i64;
    (ms << 12) | rand_part
}
