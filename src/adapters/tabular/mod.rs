//! Tabular store adapters.
//!
//! Implement `SlotStore` and `BookingStore` on top of the row-oriented
//! `TabularStore` contract. All row-index derivation and cell encoding
//! lives here; the application layer only ever sees typed records.
//!
//! Table layout (first row is a header, data starts at row 2):
//!
//! - `Bookings` columns A-H: id, name, phone, service, date, time, status,
//!   created-at
//! - `TimeSlots` columns A-D: date, time, status, booking id

mod booking_store;
mod rows;
mod slot_store;

pub use booking_store::TabularBookingStore;
pub use slot_store::TabularSlotStore;

#[cfg(test)]
pub(crate) mod fake;
