//! Booking store port.

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, StoreError};

/// Persistence port for booking records.
///
/// Bookings are append-only apart from status updates; the audit trail keeps
/// cancelled rows around.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Appends a new booking record.
    async fn append(&self, booking: &Booking) -> Result<(), StoreError>;

    /// Looks up a booking by id. Returns `None` if no row exists.
    async fn get(&self, id: &BookingId) -> Result<Option<Booking>, StoreError>;

    /// Overwrites the status of one booking.
    ///
    /// # Errors
    ///
    /// - `RowNotFound` if no booking row exists for the id
    async fn update_status(
        &self,
        id: &BookingId,
        status: BookingStatus,
    ) -> Result<(), StoreError>;

    /// All booking records, in insertion order, cancelled ones included.
    async fn list_all(&self) -> Result<Vec<Booking>, StoreError>;

    /// The next id sequence number (first booking gets 1).
    ///
    /// Backed by the store's row count, so the sequence is monotone across
    /// the store's lifetime even though cancelled rows are never removed.
    async fn next_sequence(&self) -> Result<u32, StoreError>;
}
