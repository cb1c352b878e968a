//! Booking Manager - availability checks, booking creation, cancellation.
//!
//! Owns the only cross-customer shared resource: slot rows. Availability
//! check and slot write happen under a per-(date, time) lock, so two
//! concurrent requests for the same slot cannot both succeed. The store pair
//! (booking append, slot update) is not atomic; slot status is the
//! authoritative availability signal and the booking record is the audit
//! trail.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use tracing::{info, warn};

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{
    BookingError, BookingId, CancelError, PhoneNumber, ServiceCode, StoreError,
};
use crate::domain::slot::{Slot, SlotKey, SlotStatus};
use crate::ports::{BookingStore, SlotStore};

use super::sync::KeyedMutex;

/// Data collected by the dialog for one booking.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub customer_name: String,
    pub phone: PhoneNumber,
    pub service: ServiceCode,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

/// Orchestrates slot allocation and booking lifecycle.
pub struct BookingManager<S, B>
where
    S: SlotStore,
    B: BookingStore,
{
    slots: Arc<S>,
    bookings: Arc<B>,
    slot_locks: KeyedMutex<SlotKey>,
    // Serializes id allocation with the append, so creates for different
    // slots cannot read the same sequence number.
    id_lock: tokio::sync::Mutex<()>,
}

impl<S, B> BookingManager<S, B>
where
    S: SlotStore,
    B: BookingStore,
{
    /// Creates a manager over the given stores.
    pub fn new(slots: Arc<S>, bookings: Arc<B>) -> Self {
        Self {
            slots,
            bookings,
            slot_locks: KeyedMutex::new(),
            id_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Available slots for one date, ordered by time ascending.
    pub async fn list_available_slots(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Slot>, BookingError> {
        let mut slots: Vec<Slot> = self
            .slots
            .slots_for_date(date)
            .await?
            .into_iter()
            .filter(Slot::is_available)
            .collect();
        slots.sort_by_key(|slot| slot.time);
        Ok(slots)
    }

    /// Creates a booking, re-validating availability at call time.
    ///
    /// The check-and-write runs inside the per-slot critical section; the
    /// loser of a race observes the slot already taken and gets
    /// `SlotUnavailable`.
    pub async fn create_booking(&self, request: BookingRequest) -> Result<Booking, BookingError> {
        let _guard = self.slot_locks.lock((request.date, request.time)).await;

        match self.slots.get_slot(request.date, request.time).await? {
            Some(slot) if slot.is_available() => {}
            _ => {
                return Err(BookingError::SlotUnavailable {
                    date: request.date,
                    time: request.time,
                })
            }
        }

        // Sequence read and append form one critical section; without it two
        // creates for different slots could mint the same id.
        let booking = {
            let _id_guard = self.id_lock.lock().await;
            let id = self.next_booking_id().await;
            let booking = Booking::confirmed(
                id,
                request.customer_name,
                request.phone,
                request.service,
                request.date,
                request.time,
                Utc::now(),
            );
            self.bookings.append(&booking).await?;
            booking
        };
        let id = booking.id.clone();
        self.slots
            .update_slot(request.date, request.time, SlotStatus::Booked, Some(id.clone()))
            .await?;

        info!(
            booking_id = %id,
            date = %request.date,
            time = %request.time,
            "booking confirmed"
        );
        Ok(booking)
    }

    /// Cancels a booking on behalf of `requesting_phone`.
    ///
    /// Only a currently `Confirmed` booking can be cancelled; a repeated
    /// cancellation reports `NotFound` rather than freeing the slot twice.
    pub async fn cancel_booking(
        &self,
        id: &BookingId,
        requesting_phone: &PhoneNumber,
    ) -> Result<(), CancelError> {
        // First read only locates the slot; the authoritative status check
        // happens on a re-read inside the slot's critical section.
        let located = self
            .bookings
            .get(id)
            .await?
            .ok_or_else(|| CancelError::NotFound(id.clone()))?;

        let _guard = self.slot_locks.lock((located.date, located.time)).await;

        let booking = self
            .bookings
            .get(id)
            .await?
            .ok_or_else(|| CancelError::NotFound(id.clone()))?;
        if !booking.status.can_transition_to(BookingStatus::Cancelled) {
            return Err(CancelError::NotFound(id.clone()));
        }
        if booking.phone != *requesting_phone {
            return Err(CancelError::Unauthorized(id.clone()));
        }

        self.bookings
            .update_status(id, BookingStatus::Cancelled)
            .await?;
        self.slots
            .update_slot(booking.date, booking.time, SlotStatus::Available, None)
            .await?;

        info!(booking_id = %id, "booking cancelled, slot released");
        Ok(())
    }

    /// Administrative override: takes a slot out of circulation.
    ///
    /// Blocked slots have no associated booking and are excluded from
    /// availability listings and reminder scans.
    pub async fn block_slot(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<(), BookingError> {
        let _guard = self.slot_locks.lock((date, time)).await;
        self.slots
            .update_slot(date, time, SlotStatus::Blocked, None)
            .await?;
        info!(%date, %time, "slot blocked by admin");
        Ok(())
    }

    /// Looks up a booking by id.
    pub async fn get_booking(&self, id: &BookingId) -> Result<Option<Booking>, StoreError> {
        self.bookings.get(id).await
    }

    /// The canonical admin view: non-cancelled bookings, optionally filtered
    /// by date, sorted by (date, time) ascending.
    pub async fn list_bookings(
        &self,
        date: Option<NaiveDate>,
    ) -> Result<Vec<Booking>, BookingError> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .list_all()
            .await?
            .into_iter()
            .filter(|b| b.status.is_active())
            .filter(|b| date.map_or(true, |d| b.date == d))
            .collect();
        bookings.sort_by_key(|b| (b.date, b.time));
        Ok(bookings)
    }

    /// Assigns the next BookingId, falling back to a timestamp token when the
    /// sequence read fails.
    async fn next_booking_id(&self) -> BookingId {
        match self.bookings.next_sequence().await {
            Ok(sequence) => BookingId::from_sequence(sequence),
            Err(err) => {
                warn!(error = %err, "sequence read failed, issuing timestamp booking id");
                BookingId::timestamp_fallback(Utc::now())
            }
        }
    }
}
