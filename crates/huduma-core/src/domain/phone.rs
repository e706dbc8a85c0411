use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const COUNTRY_CODE: &str = "254";
pub const LOCAL_NUMBER_LEN: usize = 9;
pub const CANONICAL_LEN: usize = COUNTRY_CODE.len() + LOCAL_NUMBER_LEN;
pub const MIN_PERMISSIVE_DIGITS: usize = 10;

static DISPLAY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(254)(\d{3})(\d{3})(\d{3})$").expect("display regex"));

/// Canonical phone number: `254` followed by a 9-digit local number starting
/// with `7` or `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalPhone(String);

impl CanonicalPhone {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let normalized = normalize_phone(Some(raw));
        if normalized.is_empty() {
            return Err(CoreError::UnrecoverablePhone(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn local_number(&self) -> &str {
        &self.0[COUNTRY_CODE.len()..]
    }

    pub fn display(&self) -> String {
        format_phone_display(&self.0)
    }
}

impl fmt::Display for CanonicalPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CanonicalPhone {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CanonicalPhone> for String {
    fn from(value: CanonicalPhone) -> Self {
        value.0
    }
}

/// Normalizes a phone number to the canonical `254XXXXXXXXX` form.
///
/// Returns an empty string when the input is absent or cannot be repaired.
/// Rules are applied in order and the first match wins:
///
/// 1. non-digits are stripped
/// 2. a single leading `0` is dropped
/// 3. more than 9 digits starting with `1` keep only the last 9 (legacy
///    records with a stray leading `1`)
/// 4. 9 digits starting with `7` or `1` get the `254` prefix
/// 5. 12 digits starting with `2547` or `2541` are returned as-is
pub fn normalize_phone(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    if raw.is_empty() {
        return String::new();
    }

    let stripped = strip_non_digits(raw);
    let mut digits = stripped.as_str();
    if let Some(rest) = digits.strip_prefix('0') {
        digits = rest;
    }
    if digits.len() > LOCAL_NUMBER_LEN && digits.starts_with('1') {
        digits = &digits[digits.len() - LOCAL_NUMBER_LEN..];
    }

    if is_local_number(digits) {
        return format!("{COUNTRY_CODE}{digits}");
    }
    if is_canonical(digits) {
        return digits.to_string();
    }
    String::new()
}

/// Loose pre-check used by admin forms: at least ten digits after stripping.
///
/// Accepts numbers that `normalize_phone` rejects (e.g. foreign numbers).
pub fn is_valid_phone(raw: &str) -> bool {
    raw.chars().filter(char::is_ascii_digit).count() >= MIN_PERMISSIVE_DIGITS
}

/// Renders `254712345678` (or `+254 712-345-678`) as `+254 712 345 678`.
///
/// Anything that is not a 12-digit `254` number is returned unchanged.
pub fn format_phone_display(raw: &str) -> String {
    let digits = strip_non_digits(raw);
    match DISPLAY_PATTERN.captures(&digits) {
        Some(caps) => format!("+{} {} {} {}", &caps[1], &caps[2], &caps[3], &caps[4]),
        None => raw.to_string(),
    }
}

fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

fn is_local_number(digits: &str) -> bool {
    digits.len() == LOCAL_NUMBER_LEN && matches!(digits.as_bytes()[0], b'7' | b'1')
}

fn is_canonical(digits: &str) -> bool {
    digits.len() == CANONICAL_LEN
        && digits
            .strip_prefix(COUNTRY_CODE)
            .is_some_and(|local| matches!(local.as_bytes()[0], b'7' | b'1'))
}
