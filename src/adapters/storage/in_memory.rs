//! Map-backed implementations of the persistence ports.

use std::collections::{BTreeMap, HashMap, HashSet};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use tokio::sync::RwLock;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::conversation::ConversationState;
use crate::domain::foundation::{BookingId, PhoneNumber, StoreError};
use crate::domain::slot::{Slot, SlotKey, SlotStatus};
use crate::ports::{BookingStore, ConversationStore, SlotStore};

/// Slot rows keyed by (date, time); the ordered map makes per-date reads
/// come out time-ascending without a sort.
#[derive(Default)]
pub struct InMemorySlotStore {
    rows: RwLock<BTreeMap<SlotKey, Slot>>,
}

impl InMemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SlotStore for InMemorySlotStore {
    async fn slots_for_date(&self, date: NaiveDate) -> Result<Vec<Slot>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .range((date, NaiveTime::MIN)..)
            .take_while(|((d, _), _)| *d == date)
            .map(|(_, slot)| slot.clone())
            .collect())
    }

    async fn get_slot(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<Option<Slot>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.get(&(date, time)).cloned())
    }

    async fn append_slots(&self, slots: &[Slot]) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        for slot in slots {
            rows.entry(slot.key()).or_insert_with(|| slot.clone());
        }
        Ok(())
    }

    async fn update_slot(
        &self,
        date: NaiveDate,
        time: NaiveTime,
        status: SlotStatus,
        booking_ref: Option<BookingId>,
    ) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let slot = rows
            .get_mut(&(date, time))
            .ok_or_else(|| StoreError::row_not_found(format!("{date} {time}")))?;
        slot.status = status;
        slot.booking_ref = booking_ref;
        Ok(())
    }

    async fn dates_with_slots(&self) -> Result<HashSet<NaiveDate>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.keys().map(|(date, _)| *date).collect())
    }
}

/// Booking rows in insertion order, like an append-only sheet.
#[derive(Default)]
pub struct InMemoryBookingStore {
    rows: RwLock<Vec<Booking>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn append(&self, booking: &Booking) -> Result<(), StoreError> {
        self.rows.write().await.push(booking.clone());
        Ok(())
    }

    async fn get(&self, id: &BookingId) -> Result<Option<Booking>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|b| b.id == *id).cloned())
    }

    async fn update_status(
        &self,
        id: &BookingId,
        status: BookingStatus,
    ) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        let booking = rows
            .iter_mut()
            .find(|b| b.id == *id)
            .ok_or_else(|| StoreError::row_not_found(id.as_str()))?;
        booking.status = status;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, StoreError> {
        Ok(self.rows.read().await.clone())
    }

    async fn next_sequence(&self) -> Result<u32, StoreError> {
        let count = self.rows.read().await.len();
        Ok(count as u32 + 1)
    }
}

/// Conversation snapshots keyed by phone; absent phones read as `Initial`.
#[derive(Default)]
pub struct InMemoryConversationStore {
    states: RwLock<HashMap<PhoneNumber, ConversationState>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn load(&self, phone: &PhoneNumber) -> Result<ConversationState, StoreError> {
        let states = self.states.read().await;
        Ok(states
            .get(phone)
            .cloned()
            .unwrap_or_else(ConversationState::initial))
    }

    async fn save(
        &self,
        phone: &PhoneNumber,
        state: ConversationState,
    ) -> Result<(), StoreError> {
        self.states.write().await.insert(phone.clone(), state);
        Ok(())
    }

    async fn reset(&self, phone: &PhoneNumber) -> Result<(), StoreError> {
        self.states.write().await.remove(phone);
        Ok(())
    }
}
