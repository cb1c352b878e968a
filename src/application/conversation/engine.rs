//! Conversation Engine - the per-phone booking dialog.
//!
//! One finite-state machine per phone number. Messages for the same phone
//! are serialized through a per-phone lock; different phones proceed in
//! parallel. Nothing escapes `handle_incoming_message`: every failure is
//! translated into an outbound reply and, unless it is simple input
//! validation, a state reset back to `Initial`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::application::booking_manager::{BookingManager, BookingRequest};
use crate::application::sync::KeyedMutex;
use crate::domain::conversation::{next_seven_days, ConversationState, ConversationStep};
use crate::domain::foundation::{BookingId, CancelError, DispatchError, PhoneNumber, ServiceCode, StoreError};
use crate::ports::{
    BookingStore, ConversationStore, InboundMessageHandler, MessageKind, MessagingGateway,
    SlotStore,
};

use super::replies;

/// Internal failures that abort one message's handling.
///
/// Never visible to the customer; the catch-all in `handle_incoming_message`
/// turns them into a generic retry prompt and a state reset.
#[derive(Debug, Error)]
enum EngineError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("conversation state missing '{0}' at booking time")]
    IncompleteState(&'static str),
}

/// Drives the multi-step booking dialog and the admin sub-mode.
pub struct ConversationEngine<S, B, C, G>
where
    S: SlotStore,
    B: BookingStore,
    C: ConversationStore,
    G: MessagingGateway,
{
    manager: Arc<BookingManager<S, B>>,
    conversations: Arc<C>,
    gateway: Arc<G>,
    admin_secret: SecretString,
    phone_locks: KeyedMutex<PhoneNumber>,
}

impl<S, B, C, G> ConversationEngine<S, B, C, G>
where
    S: SlotStore,
    B: BookingStore,
    C: ConversationStore,
    G: MessagingGateway,
{
    /// Creates an engine over the manager, state store, and gateway.
    pub fn new(
        manager: Arc<BookingManager<S, B>>,
        conversations: Arc<C>,
        gateway: Arc<G>,
        admin_secret: SecretString,
    ) -> Self {
        Self {
            manager,
            conversations,
            gateway,
            admin_secret,
            phone_locks: KeyedMutex::new(),
        }
    }

    /// Processes one inbound message end to end.
    pub async fn handle(&self, sender: PhoneNumber, text: &str, kind: MessageKind) {
        let _guard = self.phone_locks.lock(sender.clone()).await;

        if let MessageKind::Other(tag) = &kind {
            debug!(phone = %sender, kind = %tag, "non-text message, handling body as text");
        }

        if let Err(err) = self.dispatch(&sender, text.trim()).await {
            error!(phone = %sender, error = %err, "message handling failed, resetting dialog");
            if let Err(reset_err) = self.conversations.reset(&sender).await {
                warn!(phone = %sender, error = %reset_err, "state reset failed");
            }
            self.send_quiet(&sender, &replies::something_went_wrong()).await;
        }
    }

    async fn dispatch(&self, sender: &PhoneNumber, text: &str) -> Result<(), EngineError> {
        let lower = text.to_lowercase();

        // Global intercepts run before state dispatch, from any state.
        if lower.starts_with("admin ") {
            return self.handle_admin_access(sender, text).await;
        }
        if lower.starts_with("cancel ") {
            return self.handle_cancellation(sender, text).await;
        }

        let state = self.conversations.load(sender).await?;
        match state.step {
            ConversationStep::Initial => self.start_dialog(sender).await,
            ConversationStep::AwaitingService => {
                self.handle_service_selection(sender, state, text).await
            }
            ConversationStep::AwaitingDate => self.handle_date_selection(sender, state, text).await,
            ConversationStep::AwaitingTime => self.handle_time_selection(sender, state, text).await,
            ConversationStep::AwaitingName => self.handle_name_input(sender, state, text).await,
            ConversationStep::AwaitingPhoneConfirm => {
                self.handle_phone_confirmation(sender, state, text).await
            }
            ConversationStep::AdminPanel => self.handle_admin_command(sender, text).await,
        }
    }

    // ── Global intercepts ───────────────────────────────────────────────

    /// `admin <secret>`: the correct secret enters the admin panel; a wrong
    /// one replies with an error and leaves existing state untouched.
    async fn handle_admin_access(
        &self,
        sender: &PhoneNumber,
        text: &str,
    ) -> Result<(), EngineError> {
        let supplied = text.split_whitespace().nth(1).unwrap_or("");
        if supplied == self.admin_secret.expose_secret() {
            self.conversations
                .save(sender, ConversationState::admin_panel())
                .await?;
            info!(phone = %sender, "admin panel entered");
            self.send(sender, &replies::admin_menu()).await
        } else {
            warn!(phone = %sender, "admin access denied");
            self.send(sender, &replies::invalid_admin_secret()).await
        }
    }

    /// `cancel <booking-id>`: cancellation from any state; `step` is never
    /// altered.
    async fn handle_cancellation(
        &self,
        sender: &PhoneNumber,
        text: &str,
    ) -> Result<(), EngineError> {
        let token = text.split_whitespace().nth(1).unwrap_or("");
        let id = match BookingId::parse(token) {
            Ok(id) => id,
            Err(_) => {
                return self
                    .send(sender, &replies::cancel_failed("Booking not found"))
                    .await;
            }
        };

        match self.manager.cancel_booking(&id, sender).await {
            Ok(()) => self.send(sender, &replies::cancel_success(&id)).await,
            Err(err @ (CancelError::NotFound(_) | CancelError::Unauthorized(_))) => {
                self.send(sender, &replies::cancel_failed(&err.to_string()))
                    .await
            }
            Err(CancelError::Store(err)) => Err(err.into()),
        }
    }

    // ── Dialog steps ────────────────────────────────────────────────────

    async fn start_dialog(&self, sender: &PhoneNumber) -> Result<(), EngineError> {
        let mut state = ConversationState::initial();
        state.step = ConversationStep::AwaitingService;
        self.conversations.save(sender, state).await?;
        self.send(sender, &replies::welcome()).await
    }

    async fn handle_service_selection(
        &self,
        sender: &PhoneNumber,
        mut state: ConversationState,
        text: &str,
    ) -> Result<(), EngineError> {
        let Some(service) = ServiceCode::from_menu_choice(text) else {
            return self.send(sender, &replies::invalid_service()).await;
        };

        let dates = next_seven_days(today());
        let menu = replies::date_menu(&dates);
        state.service = Some(service);
        state.available_dates = dates;
        state.step = ConversationStep::AwaitingDate;
        self.conversations.save(sender, state).await?;
        self.send(sender, &menu).await
    }

    async fn handle_date_selection(
        &self,
        sender: &PhoneNumber,
        mut state: ConversationState,
        text: &str,
    ) -> Result<(), EngineError> {
        let Some(option) = parse_menu_index(text)
            .and_then(|index| state.available_dates.get(index))
            .cloned()
        else {
            return self.send(sender, &replies::invalid_date()).await;
        };

        // Availability is fetched live per request, never cached across
        // messages beyond the snapshot stored below.
        let slots = match self.manager.list_available_slots(option.date).await {
            Ok(slots) => slots,
            Err(err) => return Err(StoreError::unavailable(err.to_string()).into()),
        };
        if slots.is_empty() {
            return self.send(sender, &replies::no_slots_for_date()).await;
        }

        let menu = replies::slots_menu(&option.label, &slots);
        state.selected_date = Some(option.date);
        state.available_slots = slots.iter().map(|slot| slot.time).collect();
        state.step = ConversationStep::AwaitingTime;
        self.conversations.save(sender, state).await?;
        self.send(sender, &menu).await
    }

    async fn handle_time_selection(
        &self,
        sender: &PhoneNumber,
        mut state: ConversationState,
        text: &str,
    ) -> Result<(), EngineError> {
        let Some(time) = parse_menu_index(text)
            .and_then(|index| state.available_slots.get(index))
            .copied()
        else {
            return self.send(sender, &replies::invalid_time()).await;
        };

        state.selected_time = Some(time);
        state.step = ConversationStep::AwaitingName;
        self.conversations.save(sender, state).await?;
        self.send(sender, &replies::ask_name()).await
    }

    async fn handle_name_input(
        &self,
        sender: &PhoneNumber,
        mut state: ConversationState,
        text: &str,
    ) -> Result<(), EngineError> {
        if text.is_empty() {
            return self.send(sender, &replies::empty_name()).await;
        }

        let prompt = replies::confirm_phone(text, sender);
        state.customer_name = Some(text.to_string());
        state.step = ConversationStep::AwaitingPhoneConfirm;
        self.conversations.save(sender, state).await?;
        self.send(sender, &prompt).await
    }

    /// "yes" books with the sender's number; any other text is taken as an
    /// override phone number. Either way the dialog ends here.
    async fn handle_phone_confirmation(
        &self,
        sender: &PhoneNumber,
        state: ConversationState,
        text: &str,
    ) -> Result<(), EngineError> {
        let confirmed_phone = if text.eq_ignore_ascii_case("yes") {
            sender.clone()
        } else {
            match PhoneNumber::new(text) {
                Ok(phone) => phone,
                Err(err) => {
                    self.conversations.reset(sender).await?;
                    return self
                        .send(sender, &replies::booking_failed(&err.to_string()))
                        .await;
                }
            }
        };

        let request = BookingRequest {
            customer_name: state
                .customer_name
                .clone()
                .ok_or(EngineError::IncompleteState("customer_name"))?,
            phone: confirmed_phone,
            service: state.service.ok_or(EngineError::IncompleteState("service"))?,
            date: state
                .selected_date
                .ok_or(EngineError::IncompleteState("selected_date"))?,
            time: state
                .selected_time
                .ok_or(EngineError::IncompleteState("selected_time"))?,
        };

        let reply = match self.manager.create_booking(request).await {
            Ok(booking) => replies::booking_confirmed(&booking),
            Err(err) => replies::booking_failed(&err.to_string()),
        };
        self.conversations.reset(sender).await?;
        self.send(sender, &reply).await
    }

    // ── Admin sub-mode ──────────────────────────────────────────────────

    async fn handle_admin_command(
        &self,
        sender: &PhoneNumber,
        text: &str,
    ) -> Result<(), EngineError> {
        match text {
            "1" => self.send_day_bookings(sender, "Today", today()).await,
            "2" => {
                self.send_day_bookings(sender, "Tomorrow", today() + Duration::days(1))
                    .await
            }
            "3" => self.send(sender, &replies::admin_block_slot_stub()).await,
            "4" => self.send_all_bookings(sender).await,
            "5" => {
                self.conversations.reset(sender).await?;
                self.send(sender, &replies::admin_exited()).await
            }
            _ => self.send(sender, &replies::invalid_admin_option()).await,
        }
    }

    async fn send_day_bookings(
        &self,
        sender: &PhoneNumber,
        title: &str,
        date: NaiveDate,
    ) -> Result<(), EngineError> {
        let bookings = self
            .manager
            .list_bookings(Some(date))
            .await
            .map_err(|err| StoreError::unavailable(err.to_string()))?;

        let reply = if bookings.is_empty() {
            replies::no_bookings_for_day(title, date)
        } else {
            replies::day_bookings(title, date, &bookings)
        };
        self.send(sender, &reply).await
    }

    async fn send_all_bookings(&self, sender: &PhoneNumber) -> Result<(), EngineError> {
        let bookings = self
            .manager
            .list_bookings(None)
            .await
            .map_err(|err| StoreError::unavailable(err.to_string()))?;

        let reply = if bookings.is_empty() {
            replies::no_bookings_at_all()
        } else {
            replies::all_bookings(&bookings)
        };
        self.send(sender, &reply).await
    }

    // ── Outbound helpers ────────────────────────────────────────────────

    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<(), EngineError> {
        self.gateway.send(to, body).await?;
        Ok(())
    }

    /// Best-effort send for the generic failure reply; a second failure is
    /// only logged since there is nothing left to tell the customer with.
    async fn send_quiet(&self, to: &PhoneNumber, body: &str) {
        if let Err(err) = self.gateway.send(to, body).await {
            warn!(phone = %to, error = %err, "failed to deliver fallback reply");
        }
    }
}

#[async_trait]
impl<S, B, C, G> InboundMessageHandler for ConversationEngine<S, B, C, G>
where
    S: SlotStore,
    B: BookingStore,
    C: ConversationStore,
    G: MessagingGateway,
{
    async fn handle_incoming_message(&self, sender: PhoneNumber, text: &str, kind: MessageKind) {
        self.handle(sender, text, kind).await;
    }
}

/// Parses a 1-indexed menu reply into a 0-based index.
fn parse_menu_index(text: &str) -> Option<usize> {
    text.trim().parse::<usize>().ok()?.checked_sub(1)
}

/// The salon's current calendar date.
fn today() -> NaiveDate {
    Local::now().date_naive()
}
