//! Ghanaian mobile number (MSISDN) normalization and validation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const COUNTRY_CODE: &str = "233";
const SUBSCRIBER_DIGITS: usize = 9;

fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Format raw input as `0XX XXX XXXX` for display.
///
/// Accepts any mix of digits, spaces and a `+233` prefix. Partial input is
/// grouped as far as it goes, so this can be applied while a number is
/// being typed.
///
/// ```
/// use cletech::phone::format_phone_for_display;
///
/// assert_eq!(format_phone_for_display("233241234567"), "024 123 4567");
/// assert_eq!(format_phone_for_display("+233 24 123"), "024 123");
/// assert_eq!(format_phone_for_display(""), "");
/// ```
pub fn format_phone_for_display(input: &str) -> String {
    let mut digits = digits_only(input);
    if digits.starts_with(COUNTRY_CODE) {
        digits.drain(..COUNTRY_CODE.len());
    }
    if digits.starts_with('0') {
        digits.remove(0);
    }
    digits.truncate(SUBSCRIBER_DIGITS);

    match digits.len() {
        0 => String::new(),
        1..=2 => format!("0{}", digits),
        3..=5 => format!("0{} {}", &digits[..2], &digits[2..]),
        _ => format!("0{} {} {}", &digits[..2], &digits[2..5], &digits[5..]),
    }
}

/// True when the digits of `phone` match `^(0|233)?[2-9]\d{8}$`.
pub fn validate_phone(phone: &str) -> bool {
    let digits = digits_only(phone);
    is_subscriber_number(&digits)
        || digits.strip_prefix('0').is_some_and(is_subscriber_number)
        || digits.strip_prefix(COUNTRY_CODE).is_some_and(is_subscriber_number)
}

fn is_subscriber_number(s: &str) -> bool {
    s.len() == SUBSCRIBER_DIGITS && matches!(s.as_bytes()[0], b'2'..=b'9')
}

/// Canonicalize a bulk-input token to local form: digits only, `233`
/// dropped, leading `0` forced. The result is not validated.
pub fn normalize_phone(token: &str) -> String {
    let digits = digits_only(token);
    let local = digits.strip_prefix(COUNTRY_CODE).unwrap_or(&digits);
    if local.starts_with('0') {
        local.to_string()
    } else {
        format!("0{}", local)
    }
}

/// A validated phone number in canonical 10-digit local form (`0XXXXXXXXX`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Msisdn(String);

impl Msisdn {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = normalize_phone(input);
        if validate_phone(&normalized) && normalized.len() == SUBSCRIBER_DIGITS + 1 {
            Ok(Msisdn(normalized))
        } else {
            Err(ValidationError::InvalidPhone(input.trim().to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `233XXXXXXXXX`
    pub fn international(&self) -> String {
        format!("{}{}", COUNTRY_CODE, &self.0[1..])
    }

    pub fn display(&self) -> String {
        format_phone_for_display(&self.0)
    }
}

impl fmt::Display for Msisdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Msisdn {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Msisdn::parse(&value)
    }
}

impl From<Msisdn> for String {
    fn from(m: Msisdn) -> Self {
        m.0
    }
}
