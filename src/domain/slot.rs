//! Bookable time slots and the daily slot grid.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::BookingId;

/// Identity of a slot: one bookable (date, time) unit.
pub type SlotKey = (NaiveDate, NaiveTime);

/// Availability state of a slot.
///
/// Slots are never deleted, only transitioned. `Blocked` is an administrative
/// override with no associated booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotStatus {
    Available,
    Booked,
    Blocked,
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SlotStatus::Available => "Available",
            SlotStatus::Booked => "Booked",
            SlotStatus::Blocked => "Blocked",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SlotStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(SlotStatus::Available),
            "Booked" => Ok(SlotStatus::Booked),
            "Blocked" => Ok(SlotStatus::Blocked),
            other => Err(format!("unknown slot status '{}'", other)),
        }
    }
}

/// One bookable time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: SlotStatus,
    /// Set while the slot is `Booked`; cleared when the booking is cancelled.
    pub booking_ref: Option<BookingId>,
}

impl Slot {
    /// Creates a fresh available slot.
    pub fn available(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time,
            status: SlotStatus::Available,
            booking_ref: None,
        }
    }

    /// Returns the slot identity.
    pub fn key(&self) -> SlotKey {
        (self.date, self.time)
    }

    /// True if the slot can currently be booked.
    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }
}

/// Generates the fixed intraday grid for one date.
///
/// Start times run from `open_hour:00` up to but excluding `close_hour:00`,
/// stepped by `step_minutes`. With the defaults (09:00, 18:00, 30) that is 18
/// slots per day, the last one at 17:30.
pub fn daily_grid(
    date: NaiveDate,
    open_hour: u32,
    close_hour: u32,
    step_minutes: u32,
) -> Vec<Slot> {
    let mut slots = Vec::new();
    for hour in open_hour..close_hour {
        let mut minute = 0;
        while minute < 60 {
            if let Some(time) = NaiveTime::from_hms_opt(hour, minute, 0) {
                slots.push(Slot::available(date, time));
            }
            minute += step_minutes;
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn default_grid_has_eighteen_slots() {
        let slots = daily_grid(date(), 9, 18, 30);
        assert_eq!(slots.len(), 18);
        assert_eq!(slots.first().unwrap().time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(slots.last().unwrap().time, NaiveTime::from_hms_opt(17, 30, 0).unwrap());
    }

    #[test]
    fn grid_slots_start_available_without_booking_ref() {
        for slot in daily_grid(date(), 9, 18, 30) {
            assert!(slot.is_available());
            assert!(slot.booking_ref.is_none());
        }
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [SlotStatus::Available, SlotStatus::Booked, SlotStatus::Blocked] {
            assert_eq!(status.to_string().parse::<SlotStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_string_is_rejected() {
        assert!("Free".parse::<SlotStatus>().is_err());
    }

    proptest! {
        #[test]
        fn grid_times_stay_inside_opening_hours(
            open in 0u32..12,
            span in 1u32..12,
            step in prop::sample::select(vec![10u32, 15, 20, 30, 60]),
        ) {
            let close = open + span;
            let slots = daily_grid(date(), open, close, step);
            prop_assert!(!slots.is_empty());
            for slot in &slots {
                use chrono::Timelike;
                prop_assert!(slot.time.hour() >= open);
                prop_assert!(slot.time.hour() < close);
                prop_assert_eq!(slot.time.minute() % step.min(60), 0);
            }
        }
    }
}
