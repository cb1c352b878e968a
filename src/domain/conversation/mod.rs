//! Per-customer dialog state machine types.

mod dates;
mod state;

pub use dates::{next_seven_days, DateOption};
pub use state::{ConversationState, ConversationStep};
