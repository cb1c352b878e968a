//! Recording gateway for tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::{DispatchError, PhoneNumber};
use crate::ports::MessagingGateway;

/// Captures outbound messages instead of delivering them. Can be switched
/// into a failing mode to exercise dispatch-error paths.
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<(PhoneNumber, String)>>,
    failing: Mutex<bool>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, in dispatch order.
    pub async fn sent(&self) -> Vec<(PhoneNumber, String)> {
        self.sent.lock().await.clone()
    }

    /// The body of the most recent message, if any.
    pub async fn last_body(&self) -> Option<String> {
        self.sent.lock().await.last().map(|(_, body)| body.clone())
    }

    /// When failing, every `send` returns a `DispatchError` and records
    /// nothing.
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.lock().await = failing;
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send(&self, recipient: &PhoneNumber, body: &str) -> Result<(), DispatchError> {
        if *self.failing.lock().await {
            return Err(DispatchError::new("recording gateway set to fail"));
        }
        self.sent
            .lock()
            .await
            .push((recipient.clone(), body.to_string()));
        Ok(())
    }
}
