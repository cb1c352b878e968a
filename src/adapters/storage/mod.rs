//! In-memory store adapters.
//!
//! Back the persistence ports with process-local maps. Used throughout the
//! test suite and usable as-is for a single-process deployment that accepts
//! losing state on restart.

mod in_memory;

pub use in_memory::{InMemoryBookingStore, InMemoryConversationStore, InMemorySlotStore};
