//! `SlotStore` over a row-oriented backend.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tracing::warn;

use crate::domain::foundation::{BookingId, StoreError};
use crate::domain::slot::{Slot, SlotStatus};
use crate::ports::{Row, SlotStore, TabularStore};

use super::rows;

const TABLE: &str = "TimeSlots";
const DATA_RANGE: &str = "A2:D";
const FIRST_DATA_ROW: usize = 2;

/// Key-indexed slot access over `TimeSlots` rows.
///
/// Every operation re-reads the table; row indices are derived per call and
/// never cached, so concurrent appends from another writer only shift rows
/// between calls, never within one.
pub struct TabularSlotStore<T: TabularStore> {
    store: Arc<T>,
}

impl<T: TabularStore> TabularSlotStore<T> {
    pub fn new(store: Arc<T>) -> Self {
        Self { store }
    }

    /// Reads all rows, dropping ones that fail to decode.
    ///
    /// A hand-edited sheet can hold rows this code never wrote; skipping
    /// them keeps one bad row from taking the whole table offline.
    async fn read_all(&self) -> Result<Vec<(usize, Slot)>, StoreError> {
        let raw = self.store.get_rows(TABLE, DATA_RANGE).await?;
        let mut slots = Vec::with_capacity(raw.len());
        for (offset, row) in raw.iter().enumerate() {
            match rows::slot_from_row(row) {
                Ok(slot) => slots.push((FIRST_DATA_ROW + offset, slot)),
                Err(err) => {
                    warn!(row = FIRST_DATA_ROW + offset, error = %err, "skipping undecodable slot row");
                }
            }
        }
        Ok(slots)
    }
}

#[async_trait]
impl<T: TabularStore> SlotStore for TabularSlotStore<T> {
    async fn slots_for_date(&self, date: NaiveDate) -> Result<Vec<Slot>, StoreError> {
        let mut slots: Vec<Slot> = self
            .read_all()
            .await?
            .into_iter()
            .map(|(_, slot)| slot)
            .filter(|slot| slot.date == date)
            .collect();
        slots.sort_by_key(|slot| slot.time);
        Ok(slots)
    }

    async fn get_slot(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Option<Slot>, StoreError> {
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .map(|(_, slot)| slot)
            .find(|slot| slot.date == date && slot.time == time))
    }

    async fn append_slots(&self, slots: &[Slot]) -> Result<(), StoreError> {
        let rows: Vec<Row> = slots.iter().map(rows::slot_to_row).collect();
        self.store.append_rows(TABLE, rows).await
    }

    async fn update_slot(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        status: SlotStatus,
        booking_ref: Option<BookingId>,
    ) -> Result<(), StoreError> {
        let row_index = self
            .read_all()
            .await?
            .into_iter()
            .find(|(_, slot)| slot.date == date && slot.time == time)
            .map(|(index, _)| index)
            .ok_or_else(|| StoreError::row_not_found(format!("{date} {time}")))?;

        // Only the status and booking-ref cells change; identity cells stay.
        let values = vec![vec![
            status.to_string(),
            booking_ref
                .as_ref()
                .map(|id| id.as_str().to_string())
                .unwrap_or_default(),
        ]];
        self.store
            .update_range(TABLE, &format!("C{row_index}:D{row_index}"), values)
            .await
    }

    async fn dates_with_slots(&self) -> Result<HashSet<NaiveDate>, StoreError> {
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .map(|(_, slot)| slot.date)
            .collect())
    }
}
