//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! booking core and the outside world. Adapters implement these ports.
//!
//! - `SlotStore` / `BookingStore` - key-indexed persistence for slots and bookings
//! - `ConversationStore` - per-phone dialog state persistence
//! - `MessagingGateway` - outbound text messages to customers
//! - `TabularStore` - the raw row-oriented contract a spreadsheet-like
//!   backend exposes; the tabular adapter builds the key-indexed stores on it
//! - `InboundMessageHandler` - the produced surface a transport delivers into

mod booking_store;
mod conversation_store;
mod inbound;
mod messaging_gateway;
mod slot_store;
mod tabular_store;

pub use booking_store::BookingStore;
pub use conversation_store::ConversationStore;
pub use inbound::{InboundMessageHandler, MessageKind};
pub use messaging_gateway::MessagingGateway;
pub use slot_store::SlotStore;
pub use tabular_store::{Row, TabularStore};
