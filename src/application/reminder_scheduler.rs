//! Reminder Scheduler - periodic scan that nudges customers before their
//! appointment.
//!
//! Every scan walks the confirmed bookings and sends a reminder to those
//! whose start time falls inside the reminder window. A booking is marked
//! `Reminded` only after its message was actually delivered, so a failed
//! dispatch is retried on the next scan that still covers the window.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::application::conversation::replies;
use crate::domain::booking::BookingStatus;
use crate::domain::foundation::StoreError;
use crate::ports::{BookingStore, MessagingGateway};

/// Scan cadence and reminder window.
///
/// The eligibility window spans `window_slack_minutes` on each side of
/// `reminder_lead_minutes`. The slack must be at least the scan interval or
/// appointments can fall between two scans and never get a reminder; config
/// validation enforces that upstream.
#[derive(Debug, Clone)]
pub struct ReminderSchedulerConfig {
    pub scan_interval: Duration,
    pub reminder_lead_minutes: i64,
    pub window_slack_minutes: i64,
    pub dispatch_pause: Duration,
}

impl Default for ReminderSchedulerConfig {
    fn default() -> Self {
        Self {
            scan_interval: Duration::from_secs(5 * 60),
            reminder_lead_minutes: 60,
            window_slack_minutes: 5,
            dispatch_pause: Duration::from_secs(1),
        }
    }
}

pub struct ReminderScheduler<B, G>
where
    B: BookingStore,
    G: MessagingGateway,
{
    bookings: Arc<B>,
    gateway: Arc<G>,
    config: ReminderSchedulerConfig,
}

impl<B, G> ReminderScheduler<B, G>
where
    B: BookingStore,
    G: MessagingGateway,
{
    pub fn new(bookings: Arc<B>, gateway: Arc<G>, config: ReminderSchedulerConfig) -> Self {
        Self {
            bookings,
            gateway,
            config,
        }
    }

    /// Runs the scan loop until shutdown is signalled.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_secs = self.config.scan_interval.as_secs(),
            lead_minutes = self.config.reminder_lead_minutes,
            "reminder scheduler started"
        );
        let mut ticker = tokio::time::interval(self.config.scan_interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(err) = self.tick().await {
                        warn!(error = %err, "reminder scan failed, will retry next interval");
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("reminder scheduler stopping");
                        break;
                    }
                }
            }
        }
    }

    /// One scan against the current wall clock.
    pub async fn tick(&self) -> Result<(), StoreError> {
        self.tick_at(Local::now().naive_local()).await
    }

    /// One scan against an explicit clock reading.
    pub async fn tick_at(&self, now: NaiveDateTime) -> Result<(), StoreError> {
        let low = self.config.reminder_lead_minutes - self.config.window_slack_minutes;
        let high = self.config.reminder_lead_minutes + self.config.window_slack_minutes;

        let due: Vec<_> = self
            .bookings
            .list_all()
            .await?
            .into_iter()
            .filter(|booking| booking.status == BookingStatus::Confirmed)
            .filter(|booking| {
                let minutes_until = (booking.start_time() - now).num_minutes();
                (low..=high).contains(&minutes_until)
            })
            .collect();

        if due.is_empty() {
            debug!("reminder scan found nothing due");
            return Ok(());
        }
        info!(count = due.len(), "sending appointment reminders");

        let mut first = true;
        for booking in due {
            // Space out dispatches to stay under messaging rate limits.
            if !first {
                tokio::time::sleep(self.config.dispatch_pause).await;
            }
            first = false;

            match self.gateway.send(&booking.phone, &replies::reminder(&booking)).await {
                Ok(()) => {
                    self.bookings
                        .update_status(&booking.id, BookingStatus::Reminded)
                        .await?;
                    info!(booking_id = %booking.id, "reminder sent");
                }
                Err(err) => {
                    // Left Confirmed so the next overlapping scan retries it.
                    warn!(booking_id = %booking.id, error = %err, "reminder dispatch failed");
                }
            }
        }
        Ok(())
    }
}
