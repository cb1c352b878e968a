//! Slot Initializer - keeps the rolling availability horizon populated.
//!
//! On every pass it looks `horizon_days` ahead and appends a full day grid
//! for each date that has no slots yet. Dates that already have any slot
//! rows are skipped wholesale, so re-running never duplicates rows and
//! never resurrects booked or blocked slots.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::foundation::StoreError;
use crate::domain::slot::daily_grid;
use crate::ports::SlotStore;

#[derive(Debug, Clone)]
pub struct SlotInitializerConfig {
    pub horizon_days: u32,
    pub open_hour: u32,
    pub close_hour: u32,
    pub slot_minutes: u32,
}

impl Default for SlotInitializerConfig {
    fn default() -> Self {
        Self {
            horizon_days: 7,
            open_hour: 9,
            close_hour: 18,
            slot_minutes: 30,
        }
    }
}

pub struct SlotInitializer<S>
where
    S: SlotStore,
{
    slots: Arc<S>,
    config: SlotInitializerConfig,
}

impl<S> SlotInitializer<S>
where
    S: SlotStore,
{
    pub fn new(slots: Arc<S>, config: SlotInitializerConfig) -> Self {
        Self { slots, config }
    }

    /// Runs once immediately, then at every local midnight until shutdown.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(
            horizon_days = self.config.horizon_days,
            "slot initializer started"
        );
        if let Err(err) = self.tick().await {
            warn!(error = %err, "slot initialization failed, will retry at midnight");
        }
        loop {
            let pause = until_next_midnight(Local::now().naive_local());
            tokio::select! {
                _ = tokio::time::sleep(pause) => {
                    if let Err(err) = self.tick().await {
                        warn!(error = %err, "slot initialization failed, will retry at midnight");
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("slot initializer stopping");
                        break;
                    }
                }
            }
        }
    }

    /// One pass anchored at today's date.
    pub async fn tick(&self) -> Result<u32, StoreError> {
        self.tick_from(Local::now().date_naive()).await
    }

    /// One pass anchored at an explicit date. Returns the number of days
    /// that were newly populated.
    pub async fn tick_from(&self, today: NaiveDate) -> Result<u32, StoreError> {
        let populated = self.slots.dates_with_slots().await?;
        let mut created = 0;

        for offset in 0..self.config.horizon_days {
            let date = today + chrono::Duration::days(i64::from(offset));
            if populated.contains(&date) {
                continue;
            }
            let grid = daily_grid(
                date,
                self.config.open_hour,
                self.config.close_hour,
                self.config.slot_minutes,
            );
            self.slots.append_slots(&grid).await?;
            debug!(%date, slots = grid.len(), "populated day");
            created += 1;
        }

        if created > 0 {
            info!(days = created, "availability horizon extended");
        }
        Ok(created)
    }
}

fn until_next_midnight(now: chrono::NaiveDateTime) -> Duration {
    let midnight = (now.date() + chrono::Duration::days(1)).and_time(chrono::NaiveTime::MIN);
    (midnight - now)
        .to_std()
        .unwrap_or(Duration::from_secs(24 * 60 * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySlotStore;
    use crate::domain::slot::SlotStatus;
    use chrono::NaiveTime;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[tokio::test]
    async fn first_pass_fills_the_whole_horizon() {
        let slots = Arc::new(InMemorySlotStore::new());
        let initializer = SlotInitializer::new(Arc::clone(&slots), SlotInitializerConfig::default());

        let created = initializer.tick_from(today()).await.unwrap();

        assert_eq!(created, 7);
        for offset in 0..7 {
            let date = today() + chrono::Duration::days(offset);
            let day = slots.slots_for_date(date).await.unwrap();
            assert_eq!(day.len(), 18, "expected 18 half-hour slots on {date}");
            assert!(day.iter().all(|slot| slot.status == SlotStatus::Available));
        }
    }

    #[tokio::test]
    async fn second_pass_is_a_no_op() {
        let slots = Arc::new(InMemorySlotStore::new());
        let initializer = SlotInitializer::new(Arc::clone(&slots), SlotInitializerConfig::default());
        initializer.tick_from(today()).await.unwrap();

        let created = initializer.tick_from(today()).await.unwrap();

        assert_eq!(created, 0);
        assert_eq!(slots.slots_for_date(today()).await.unwrap().len(), 18);
    }

    #[tokio::test]
    async fn rolling_forward_only_adds_the_new_day() {
        let slots = Arc::new(InMemorySlotStore::new());
        let initializer = SlotInitializer::new(Arc::clone(&slots), SlotInitializerConfig::default());
        initializer.tick_from(today()).await.unwrap();

        let created = initializer
            .tick_from(today() + chrono::Duration::days(1))
            .await
            .unwrap();

        assert_eq!(created, 1);
        let eighth = today() + chrono::Duration::days(7);
        assert_eq!(slots.slots_for_date(eighth).await.unwrap().len(), 18);
    }

    #[test]
    fn midnight_pause_counts_down_the_remaining_day() {
        let now = today().and_hms_opt(23, 59, 0).unwrap();
        assert_eq!(until_next_midnight(now), Duration::from_secs(60));

        let start_of_day = today().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(
            until_next_midnight(start_of_day),
            Duration::from_secs(24 * 60 * 60)
        );
    }

    #[tokio::test]
    async fn booked_slots_survive_a_rerun() {
        let slots = Arc::new(InMemorySlotStore::new());
        let initializer = SlotInitializer::new(Arc::clone(&slots), SlotInitializerConfig::default());
        initializer.tick_from(today()).await.unwrap();
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        slots
            .update_slot(today(), nine, SlotStatus::Booked, None)
            .await
            .unwrap();

        initializer.tick_from(today()).await.unwrap();

        let slot = slots.get_slot(today(), nine).await.unwrap().unwrap();
        assert_eq!(slot.status, SlotStatus::Booked);
    }
}
