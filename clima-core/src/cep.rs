use std::{fmt, str::FromStr};

use crate::error::Error;

/// Strip everything but decimal digits. Applied before validation and before
/// building service URLs; formatting never changes the digit sequence, so
/// `sanitize(format(x)) == sanitize(x)`.
pub fn sanitize(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Display shape for a code as it is being typed: digits only, capped at 8,
/// with a hyphen after the fifth digit once a sixth is present.
///
/// `"12345678"` → `"12345-678"`, `"123"` → `"123"`. Idempotent on its own
/// output, so reactive re-formatting never loops.
pub fn format(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).take(8).collect();
    if digits.len() <= 5 {
        return digits;
    }
    let (prefix, suffix) = digits.split_at(5);
    format!("{prefix}-{suffix}")
}

/// Validated postal code: exactly 8 decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

impl Cep {
    /// Sanitize and validate. Codes that do not sanitize to 8 digits never
    /// reach the directory service.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let digits = sanitize(input);
        if digits.len() != 8 {
            return Err(Error::Validation("postal code must have 8 digits".to_string()));
        }
        Ok(Self(digits))
    }

    /// The bare digit sequence, as embedded in service URLs.
    pub fn digits(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", &self.0[..5], &self.0[5..])
    }
}

impl FromStr for Cep {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_truncates_to_eight_digits_before_hyphenation() {
        assert_eq!(format("1234567890"), "12345-678");
    }

    #[test]
    fn format_leaves_short_inputs_unhyphenated() {
        assert_eq!(format(""), "");
        assert_eq!(format("123"), "123");
        assert_eq!(format("12345"), "12345");
        assert_eq!(format("123456"), "12345-6");
    }

    #[test]
    fn format_is_idempotent() {
        for input in ["", "1", "12345", "123456", "12345678", "12345-678"] {
            let once = format(input);
            assert_eq!(format(&once), once);
        }
    }

    #[test]
    fn sanitize_of_format_equals_sanitize_for_short_inputs() {
        // Holds for anything that sanitizes to at most 8 digits.
        for input in ["", "1", "12", "12345", "123456", "1234567", "12345678", "12a45-678", " 013 101 00 "] {
            assert_eq!(sanitize(&format(input)), sanitize(input));
        }
    }

    #[test]
    fn parse_accepts_formatted_and_raw_codes() {
        assert_eq!(Cep::parse("01310-100").unwrap().digits(), "01310100");
        assert_eq!(Cep::parse("01310100").unwrap().digits(), "01310100");
        assert_eq!(Cep::parse(" 01.310-100 ").unwrap().digits(), "01310100");
    }

    #[test]
    fn parse_rejects_wrong_lengths() {
        for input in ["", "1234567", "123456789", "abcdefgh"] {
            let err = Cep::parse(input).unwrap_err();
            assert_eq!(err.to_string(), "postal code must have 8 digits");
        }
    }

    #[test]
    fn display_is_the_hyphenated_form() {
        let cep: Cep = "01310100".parse().unwrap();
        assert_eq!(cep.to_string(), "01310-100");
    }
}
