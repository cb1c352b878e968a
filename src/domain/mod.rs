//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `slot` - Bookable time slots and the daily slot grid
//! - `booking` - Booking records and their status lifecycle
//! - `conversation` - Per-customer dialog state machine types

pub mod booking;
pub mod conversation;
pub mod foundation;
pub mod slot;
