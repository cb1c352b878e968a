//! Phone number value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A customer phone number in the messaging transport's addressing scheme.
///
/// The transport hands us an opaque identity string (digits, possibly with a
/// leading `+`). We keep it opaque: it is the conversation key and the
/// authorization principal for cancellations, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Creates a phone number from a raw transport identity.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("phone"));
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
        {
            return Err(ValidationError::invalid_format(
                "phone",
                "only digits, '+', '-' and spaces allowed",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_transport_style_numbers() {
        assert!(PhoneNumber::new("15551234567").is_ok());
        assert!(PhoneNumber::new("+49 170 1234567").is_ok());
    }

    #[test]
    fn rejects_empty_and_alphabetic() {
        assert!(PhoneNumber::new("  ").is_err());
        assert!(PhoneNumber::new("call-me-maybe").is_err());
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let phone = PhoneNumber::new(" 15551234567 ").unwrap();
        assert_eq!(phone.as_str(), "15551234567");
    }
}
