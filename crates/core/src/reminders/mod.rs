//! The scheduled-reminder engine.
//!
//! `rules` holds the pure trigger evaluation; `patch` and `clash` drive one
//! tick each of the two recurring checks, against port traits only. The
//! infra layer owns the cron cadence and calls `run_tick` once a minute.

pub mod clash;
pub mod patch;
pub mod ports;
pub mod rules;

pub use clash::{ClashReminderConfig, ClashReminderService};
pub use patch::{PatchReminderConfig, PatchReminderService};
