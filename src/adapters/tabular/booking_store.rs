//! `BookingStore` over a row-oriented backend.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, StoreError};
use crate::ports::{BookingStore, TabularStore};

use super::rows;

const TABLE: &str = "Bookings";
const DATA_RANGE: &str = "A2:H";
const FIRST_DATA_ROW: usize = 2;
const STATUS_COLUMN: char = 'G';

/// Key-indexed booking access over `Bookings` rows.
pub struct TabularBookingStore<T: TabularStore> {
    store: Arc<T>,
}

impl<T: TabularStore> TabularBookingStore<T> {
    pub fn new(store: Arc<T>) -> Self {
        Self { store }
    }

    async fn read_all(&self) -> Result<Vec<(usize, Booking)>, StoreError> {
        let raw = self.store.get_rows(TABLE, DATA_RANGE).await?;
        let mut bookings = Vec::with_capacity(raw.len());
        for (offset, row) in raw.iter().enumerate() {
            match rows::booking_from_row(row) {
                Ok(booking) => bookings.push((FIRST_DATA_ROW + offset, booking)),
                Err(err) => {
                    warn!(row = FIRST_DATA_ROW + offset, error = %err, "skipping undecodable booking row");
                }
            }
        }
        Ok(bookings)
    }
}

#[async_trait]
impl<T: TabularStore> BookingStore for TabularBookingStore<T> {
    async fn append(&self, booking: &Booking) -> Result<(), StoreError> {
        self.store
            .append_rows(TABLE, vec![rows::booking_to_row(booking)])
            .await
    }

    async fn get(&self, id: &BookingId) -> Result<Option<Booking>, StoreError> {
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .map(|(_, booking)| booking)
            .find(|booking| booking.id == *id))
    }

    async fn update_status(
        &self,
        id: &BookingId,
        status: BookingStatus,
    ) -> Result<(), StoreError> {
        let row_index = self
            .read_all()
            .await?
            .into_iter()
            .find(|(_, booking)| booking.id == *id)
            .map(|(index, _)| index)
            .ok_or_else(|| StoreError::row_not_found(id.as_str()))?;

        self.store
            .update_range(
                TABLE,
                &format!("{STATUS_COLUMN}{row_index}"),
                vec![vec![status.to_string()]],
            )
            .await
    }

    async fn list_all(&self) -> Result<Vec<Booking>, StoreError> {
        Ok(self
            .read_all()
            .await?
            .into_iter()
            .map(|(_, booking)| booking)
            .collect())
    }

    /// The raw row count drives the sequence, so cancelled bookings still
    /// hold their number and ids never repeat.
    async fn next_sequence(&self) -> Result<u32, StoreError> {
        let count = self.store.get_rows(TABLE, DATA_RANGE).await?.len();
        Ok(count as u32 + 1)
    }
}
