//! Conversation state for one phone number.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::DateOption;
use crate::domain::foundation::ServiceCode;

/// Progress marker through the booking dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStep {
    Initial,
    AwaitingService,
    AwaitingDate,
    AwaitingTime,
    AwaitingName,
    AwaitingPhoneConfirm,
    AdminPanel,
}

/// Everything the dialog has collected from a customer so far.
///
/// Created lazily at `Initial` on first contact and reset back to `Initial`
/// on completion, failure, or admin exit. The menus (`available_dates`,
/// `available_slots`) are snapshots of what was last offered, so a numeric
/// reply can be resolved against exactly what the customer saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    pub step: ConversationStep,
    pub service: Option<ServiceCode>,
    pub selected_date: Option<NaiveDate>,
    pub selected_time: Option<NaiveTime>,
    pub customer_name: Option<String>,
    pub available_dates: Vec<DateOption>,
    pub available_slots: Vec<NaiveTime>,
}

impl ConversationState {
    /// Fresh state at the start of the dialog.
    pub fn initial() -> Self {
        Self {
            step: ConversationStep::Initial,
            service: None,
            selected_date: None,
            selected_time: None,
            customer_name: None,
            available_dates: Vec::new(),
            available_slots: Vec::new(),
        }
    }

    /// State entering the admin sub-mode; collected booking data is dropped.
    pub fn admin_panel() -> Self {
        Self {
            step: ConversationStep::AdminPanel,
            ..Self::initial()
        }
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::initial()
    }
}
