//! Application configuration structures.
//!
//! Populated by the infra config loader from environment variables or a
//! `config.{json,toml}` file; read-only after startup.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub discord: DiscordSettings,
    pub data: DataSettings,
    #[serde(default)]
    pub reminders: ReminderSettings,
}

/// Discord credentials and output channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiscordSettings {
    pub token: String,
    /// Snowflake id of the channel reminders are posted to.
    pub channel_id: String,
}

/// Where the calendars and persisted state live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataSettings {
    pub dir: PathBuf,
}

impl DataSettings {
    pub fn patch_dates_path(&self) -> PathBuf {
        self.dir.join(constants::PATCH_DATES_FILE)
    }

    pub fn clash_dates_path(&self) -> PathBuf {
        self.dir.join(constants::CLASH_DATES_FILE)
    }

    pub fn clash_info_path(&self) -> PathBuf {
        self.dir.join(constants::CLASH_INFO_FILE)
    }

    pub fn champions_path(&self) -> PathBuf {
        self.dir.join(constants::CHAMPIONS_FILE)
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.dir.join(constants::SENT_REMINDERS_FILE)
    }

    pub fn last_patch_url_path(&self) -> PathBuf {
        self.dir.join(constants::LAST_PATCH_URL_FILE)
    }
}

/// Reminder engine tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReminderSettings {
    /// How long past its trigger instant a reminder is still considered due.
    /// Defaults to the tick interval.
    #[serde(default = "default_due_window_seconds")]
    pub due_window_seconds: u64,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self { due_window_seconds: default_due_window_seconds() }
    }
}

fn default_due_window_seconds() -> u64 {
    constants::TICK_INTERVAL_SECS
}
