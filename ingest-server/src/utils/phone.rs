//! Phone number normalization
//!
//! Customer phones arrive in many shapes ("012-345 6789", "+60123456789",
//! "60123456789"). All storage and lookup uses one canonical form:
//! country-code prefixed digits with no separators.

/// Normalize a raw phone string to canonical form.
///
/// Strips every non-digit character, then:
/// - leading `0` is replaced with the country code (local format)
/// - an existing country code prefix is kept as-is
///
/// Idempotent: normalizing an already normalized number is a no-op.
pub fn normalize(raw: &str, country_code: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if let Some(rest) = digits.strip_prefix('0') {
        return format!("{country_code}{rest}");
    }
    digits
}

/// Minimal sanity check on a normalized phone (digits only, plausible length)
pub fn is_valid(normalized: &str) -> bool {
    normalized.len() >= 9
        && normalized.len() <= 15
        && normalized.chars().all(|c| c.is_ascii_digit())
}
