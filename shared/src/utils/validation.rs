//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

static VERIFICATION_CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}$").expect("Invalid verification code regex"));

/// Check if a string is not empty after trimming whitespace
pub fn not_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Same as [`not_empty`] for optional form values
pub fn is_provided(value: Option<&str>) -> bool {
    value.map(not_empty).unwrap_or(false)
}

/// Check that a value has at least `min` characters
pub fn min_length(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Check if a value looks like a 4-digit verification code
pub fn is_verification_code_format(value: &str) -> bool {
    VERIFICATION_CODE_PATTERN.is_match(value)
}
