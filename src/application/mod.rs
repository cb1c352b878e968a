//! Application layer - orchestration over the domain through the ports.
//!
//! - `booking_manager` - slot availability, booking creation, cancellation
//! - `conversation` - the per-phone dialog engine and its reply texts
//! - `reminder_scheduler` - periodic reminder dispatch
//! - `slot_initializer` - rolling-horizon slot materialization
//! - `sync` - per-key mutual exclusion shared by manager and engine

pub mod booking_manager;
pub mod conversation;
pub mod reminder_scheduler;
pub mod slot_initializer;
pub mod sync;

pub use booking_manager::{BookingManager, BookingRequest};
pub use conversation::ConversationEngine;
pub use reminder_scheduler::{ReminderScheduler, ReminderSchedulerConfig};
pub use slot_initializer::{SlotInitializer, SlotInitializerConfig};
