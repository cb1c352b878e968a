//! Cell encoding and decoding for the tabular layout.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, PhoneNumber, ServiceCode, StoreError};
use crate::domain::slot::{Slot, SlotStatus};
use crate::ports::Row;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

pub fn encode_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn encode_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

pub fn decode_date(cell: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(cell.trim(), DATE_FORMAT)
        .map_err(|err| malformed("date", cell, err))
}

pub fn decode_time(cell: &str) -> Result<NaiveTime, StoreError> {
    NaiveTime::parse_from_str(cell.trim(), TIME_FORMAT)
        .map_err(|err| malformed("time", cell, err))
}

fn malformed(what: &str, cell: &str, err: impl std::fmt::Display) -> StoreError {
    StoreError::unavailable(format!("malformed {what} cell '{cell}': {err}"))
}

fn cell(row: &Row, index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

pub fn slot_to_row(slot: &Slot) -> Row {
    vec![
        encode_date(slot.date),
        encode_time(slot.time),
        slot.status.to_string(),
        slot.booking_ref
            .as_ref()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default(),
    ]
}

pub fn slot_from_row(row: &Row) -> Result<Slot, StoreError> {
    let status: SlotStatus = cell(row, 2)
        .parse()
        .map_err(|err: String| StoreError::unavailable(err))?;
    let booking_ref = match cell(row, 3).trim() {
        "" => None,
        token => Some(BookingId::parse(token).map_err(|err| {
            StoreError::unavailable(format!("malformed booking ref: {err}"))
        })?),
    };
    Ok(Slot {
        date: decode_date(cell(row, 0))?,
        time: decode_time(cell(row, 1))?,
        status,
        booking_ref,
    })
}

pub fn booking_to_row(booking: &Booking) -> Row {
    vec![
        booking.id.as_str().to_string(),
        booking.customer_name.clone(),
        booking.phone.as_str().to_string(),
        booking.service.name().to_string(),
        encode_date(booking.date),
        encode_time(booking.time),
        booking.status.to_string(),
        booking.created_at.to_rfc3339(),
    ]
}

pub fn booking_from_row(row: &Row) -> Result<Booking, StoreError> {
    let id = BookingId::parse(cell(row, 0))
        .map_err(|err| StoreError::unavailable(format!("malformed booking id: {err}")))?;
    let phone = PhoneNumber::new(cell(row, 2))
        .map_err(|err| StoreError::unavailable(format!("malformed phone cell: {err}")))?;
    let service = ServiceCode::from_name(cell(row, 3))
        .ok_or_else(|| StoreError::unavailable(format!("unknown service '{}'", cell(row, 3))))?;
    let status: BookingStatus = cell(row, 6)
        .parse()
        .map_err(|err: String| StoreError::unavailable(err))?;
    let created_at = DateTime::parse_from_rfc3339(cell(row, 7).trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| malformed("created-at", cell(row, 7), err))?;

    Ok(Booking {
        id,
        customer_name: cell(row, 1).to_string(),
        phone,
        service,
        date: decode_date(cell(row, 4))?,
        time: decode_time(cell(row, 5))?,
        status,
        created_at,
    })
}
