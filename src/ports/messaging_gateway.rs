//! Messaging gateway port.

use async_trait::async_trait;

use crate::domain::foundation::{DispatchError, PhoneNumber};

/// Outbound text messaging to a customer.
///
/// The recipient identity is whatever the transport uses as an address. Any
/// failure surfaces as a `DispatchError`; callers decide whether to retry
/// (the reminder scheduler) or to log and move on (the dialog).
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Delivers one text message.
    async fn send(&self, recipient: &PhoneNumber, body: &str) -> Result<(), DispatchError>;
}
