//! Slot store port.
//!
//! Key-indexed access to slot rows. Implementations own whatever row-index
//! bookkeeping their backend needs; callers only ever address a slot by its
//! (date, time) identity.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashSet;

use crate::domain::foundation::{BookingId, StoreError};
use crate::domain::slot::{Slot, SlotStatus};

/// Persistence port for time slots.
///
/// No transactional guarantees are assumed beyond read-after-write
/// consistency; the Booking Manager layers its own critical section per
/// (date, time) on top.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// All slots for one date, ordered by time ascending.
    async fn slots_for_date(&self, date: NaiveDate) -> Result<Vec<Slot>, StoreError>;

    /// Looks up a single slot by identity. Returns `None` if no row exists.
    async fn get_slot(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Option<Slot>, StoreError>;

    /// Appends freshly generated slots. Never overwrites existing rows.
    async fn append_slots(&self, slots: &[Slot]) -> Result<(), StoreError>;

    /// Updates the status and booking reference of one slot.
    ///
    /// # Errors
    ///
    /// - `RowNotFound` if no slot row exists for the key
    async fn update_slot(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        status: SlotStatus,
        booking_ref: Option<BookingId>,
    ) -> Result<(), StoreError>;

    /// The set of dates that already have slot rows (initializer idempotence).
    async fn dates_with_slots(&self) -> Result<HashSet<NaiveDate>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SlotStore) {}
    }
}
