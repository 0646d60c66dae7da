//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

use chrono_tz::Tz;

/// All reminder triggers are evaluated against this timezone.
pub const TARGET_TZ: Tz = chrono_tz::America::Mexico_City;

// Patch-notes site
pub const NEWS_BASE_URL: &str = "https://www.leagueoflegends.com";
pub const PATCH_LIST_URL: &str = "https://www.leagueoflegends.com/es-mx/news/tags/patch-notes/";

// Reminder trigger times (local, hour/minute)
pub const PRE_PATCH_REMINDER_HOUR: u32 = 10;
pub const NOTES_PUBLISHED_HOUR: u32 = 0;
pub const RANKED_DISABLE_HOUR: u32 = 1;
pub const RANKED_DISABLE_MINUTE: u32 = 30;
pub const PATCH_ROLLOUT_HOUR: u32 = 3;
pub const FORMATION_REMINDER_HOUR: u32 = 10;
pub const TOURNAMENT_MORNING_HOUR: u32 = 10;
pub const FINAL_CALL_HOUR: u32 = 18;
pub const FINAL_CALL_MINUTE: u32 = 50;

// Clash confirmation window (local)
pub const CONFIRMATION_START_HOUR: u32 = 17;
pub const CONFIRMATION_END_HOUR: u32 = 19;

// Unscheduled-patch detection runs when the minute is a multiple of this
pub const UNSCHEDULED_CHECK_EVERY_MINUTES: u32 = 30;

// Networking
pub const HTTP_TIMEOUT_SECS: u64 = 10;

// Scheduler cadence
pub const TICK_INTERVAL_SECS: u64 = 60;

// Persisted state file names (relative to the configured data directory)
pub const PATCH_DATES_FILE: &str = "patch_dates.json";
pub const CLASH_DATES_FILE: &str = "clash_dates.json";
pub const CLASH_INFO_FILE: &str = "clash_info.json";
pub const CHAMPIONS_FILE: &str = "champions.txt";
pub const SENT_REMINDERS_FILE: &str = "sent_reminders.json";
pub const LAST_PATCH_URL_FILE: &str = "last_patch_url.txt";
