//! Booking records and their status lifecycle.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{BookingId, PhoneNumber, ServiceCode};

/// Status of a booking, distinct from the status of its slot.
///
/// Transitions only move forward:
/// `Confirmed -> Reminded` (terminal) or `Confirmed -> Cancelled` (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Confirmed,
    Reminded,
    Cancelled,
}

impl BookingStatus {
    /// Whether the forward-only lifecycle permits this transition.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Confirmed, BookingStatus::Reminded)
                | (BookingStatus::Confirmed, BookingStatus::Cancelled)
        )
    }

    /// True for statuses that still hold their slot.
    pub fn is_active(self) -> bool {
        self != BookingStatus::Cancelled
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Reminded => "Reminded",
            BookingStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Confirmed" => Ok(BookingStatus::Confirmed),
            "Reminded" => Ok(BookingStatus::Reminded),
            "Cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("unknown booking status '{}'", other)),
        }
    }
}

/// A customer's claim on a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub customer_name: String,
    pub phone: PhoneNumber,
    pub service: ServiceCode,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Creates a freshly confirmed booking.
    pub fn confirmed(
        id: BookingId,
        customer_name: impl Into<String>,
        phone: PhoneNumber,
        service: ServiceCode,
        date: NaiveDate,
        time: NaiveTime,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_name: customer_name.into(),
            phone,
            service,
            date,
            time,
            status: BookingStatus::Confirmed,
            created_at,
        }
    }

    /// Appointment start in the salon's local wall-clock time.
    pub fn start_time(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}
