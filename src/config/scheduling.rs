//! Background scheduling settings.

use std::time::Duration;

use serde::Deserialize;

use crate::application::{ReminderSchedulerConfig, SlotInitializerConfig};

use super::error::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingConfig {
    /// Minutes before an appointment that the reminder should land.
    #[serde(default = "default_reminder_lead_minutes")]
    pub reminder_lead_minutes: u32,
    /// Reminder scan cadence.
    #[serde(default = "default_scan_interval_minutes")]
    pub scan_interval_minutes: u32,
    /// Pause between consecutive reminder dispatches.
    #[serde(default = "default_dispatch_pause_seconds")]
    pub dispatch_pause_seconds: u32,
    /// How many days of availability to keep populated.
    #[serde(default = "default_horizon_days")]
    pub horizon_days: u32,
    #[serde(default = "default_open_hour")]
    pub open_hour: u32,
    #[serde(default = "default_close_hour")]
    pub close_hour: u32,
    #[serde(default = "default_slot_minutes")]
    pub slot_minutes: u32,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            reminder_lead_minutes: default_reminder_lead_minutes(),
            scan_interval_minutes: default_scan_interval_minutes(),
            dispatch_pause_seconds: default_dispatch_pause_seconds(),
            horizon_days: default_horizon_days(),
            open_hour: default_open_hour(),
            close_hour: default_close_hour(),
            slot_minutes: default_slot_minutes(),
        }
    }
}

impl SchedulingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_interval_minutes == 0 {
            return Err(ConfigError::invalid("scheduling.scan_interval_minutes must be at least 1"));
        }
        if self.reminder_lead_minutes < self.scan_interval_minutes {
            // The window is one scan interval wide on each side of the lead;
            // a lead shorter than the interval would reach into the past.
            return Err(ConfigError::invalid(
                "scheduling.reminder_lead_minutes must be at least the scan interval",
            ));
        }
        if self.horizon_days == 0 {
            return Err(ConfigError::invalid("scheduling.horizon_days must be at least 1"));
        }
        if self.open_hour >= self.close_hour || self.close_hour > 24 {
            return Err(ConfigError::invalid(
                "scheduling.open_hour must be before close_hour, close_hour at most 24",
            ));
        }
        if self.slot_minutes == 0 || self.slot_minutes > 60 {
            return Err(ConfigError::invalid("scheduling.slot_minutes must be within 1-60"));
        }
        Ok(())
    }

    pub fn reminder_scheduler(&self) -> ReminderSchedulerConfig {
        ReminderSchedulerConfig {
            scan_interval: Duration::from_secs(u64::from(self.scan_interval_minutes) * 60),
            reminder_lead_minutes: i64::from(self.reminder_lead_minutes),
            window_slack_minutes: i64::from(self.scan_interval_minutes),
            dispatch_pause: Duration::from_secs(u64::from(self.dispatch_pause_seconds)),
        }
    }

    pub fn slot_initializer(&self) -> SlotInitializerConfig {
        SlotInitializerConfig {
            horizon_days: self.horizon_days,
            open_hour: self.open_hour,
            close_hour: self.close_hour,
            slot_minutes: self.slot_minutes,
        }
    }
}

fn default_reminder_lead_minutes() -> u32 {
    60
}

fn default_scan_interval_minutes() -> u32 {
    5
}

fn default_dispatch_pause_seconds() -> u32 {
    1
}

fn default_horizon_days() -> u32 {
    7
}

fn default_open_hour() -> u32 {
    9
}

fn default_close_hour() -> u32 {
    18
}

fn default_slot_minutes() -> u32 {
    30
}
