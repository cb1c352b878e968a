//! HTTP adapter: webhook intake and health probe.

mod signature;
mod webhook;

pub use signature::verify_signature;
pub use webhook::{router, WebhookState};
