//! Strongly-typed identifier value objects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Unique identifier for a booking.
///
/// Assigned from the booking store's row sequence as `BK` plus a zero-padded
/// five-digit number (`BK00042`). When the sequence cannot be read, a
/// timestamp-derived token is issued instead, trading collision safety for
/// availability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Creates a BookingId from the store's next sequence number.
    pub fn from_sequence(sequence: u32) -> Self {
        Self(format!("BK{:05}", sequence))
    }

    /// Creates a fallback BookingId derived from the current time.
    ///
    /// Used when the sequence read fails; the last five digits of the unix
    /// millisecond timestamp keep the token short and mostly unique.
    pub fn timestamp_fallback(now: DateTime<Utc>) -> Self {
        let millis = now.timestamp_millis().unsigned_abs();
        Self(format!("BK{:05}", millis % 100_000))
    }

    /// Parses a customer-supplied token into a BookingId.
    ///
    /// Accepts any single non-empty token; whether it names a real booking is
    /// decided by the store lookup, not the parse.
    pub fn parse(token: &str) -> Result<Self, ValidationError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ValidationError::empty_field("booking_id"));
        }
        if token.contains(char::is_whitespace) {
            return Err(ValidationError::invalid_format(
                "booking_id",
                "must be a single token",
            ));
        }
        Ok(Self(token.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
