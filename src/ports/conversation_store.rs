//! Conversation state store port.
//!
//! The Conversation Engine is the sole reader and writer of a phone number's
//! state; the store only persists snapshots. Serializing concurrent messages
//! for the same phone is the engine's job (it holds a per-phone lock around
//! load/handle/save), so this port stays a plain get/put contract.

use async_trait::async_trait;

use crate::domain::conversation::ConversationState;
use crate::domain::foundation::{PhoneNumber, StoreError};

/// Persistence port for per-phone conversation state.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Loads the state for a phone number, creating `Initial` state lazily
    /// on first contact.
    async fn load(&self, phone: &PhoneNumber) -> Result<ConversationState, StoreError>;

    /// Stores the state snapshot for a phone number.
    async fn save(
        &self,
        phone: &PhoneNumber,
        state: ConversationState,
    ) -> Result<(), StoreError>;

    /// Resets a phone number back to `Initial`.
    async fn reset(&self, phone: &PhoneNumber) -> Result<(), StoreError>;
}
