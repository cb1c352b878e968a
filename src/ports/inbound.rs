//! Inbound message surface.
//!
//! The transport (webhook adapter) acknowledges delivery immediately and
//! hands the message to this handler on a spawned task; nothing awaits
//! processing completion, so the handler must never fail past its boundary.

use async_trait::async_trait;

use crate::domain::foundation::PhoneNumber;

/// Kind of inbound message as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    /// Anything else the transport can deliver (media, reactions, ...).
    Other(String),
}

impl MessageKind {
    /// Parses the transport's type tag.
    pub fn from_transport(kind: &str) -> Self {
        match kind {
            "text" => MessageKind::Text,
            other => MessageKind::Other(other.to_string()),
        }
    }
}

/// Entry point the transport delivers inbound messages into.
#[async_trait]
pub trait InboundMessageHandler: Send + Sync {
    /// Processes one inbound message. All outcomes are expressed as outbound
    /// sends; this call never returns an error.
    async fn handle_incoming_message(&self, sender: PhoneNumber, text: &str, kind: MessageKind);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_tag_parses_text_and_other() {
        assert_eq!(MessageKind::from_transport("text"), MessageKind::Text);
        assert_eq!(
            MessageKind::from_transport("image"),
            MessageKind::Other("image".to_string())
        );
    }
}
