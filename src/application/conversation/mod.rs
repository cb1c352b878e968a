//! Conversation engine and reply texts.

mod engine;
pub mod replies;

pub use engine::ConversationEngine;
