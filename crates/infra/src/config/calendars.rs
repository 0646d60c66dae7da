//! Loaders for the static calendars and info tables.
//!
//! Every loader degrades to an empty default with a warning: a missing or
//! broken data file must never prevent the bot from starting.

use std::path::Path;

use chrono::NaiveDate;
use poroherald_domain::{
    ChampionRoster, ClashCalendar, ClashEvent, ClashInfo, PatchCalendar,
};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Deserialize)]
struct PatchDatesFile {
    #[serde(default)]
    patch_dates: Vec<NaiveDate>,
}

#[derive(Deserialize)]
struct ClashDatesFile {
    #[serde(default)]
    clash_events: Vec<ClashEvent>,
}

/// Load the ordered patch calendar from `patch_dates.json`.
pub fn load_patch_calendar(path: &Path) -> PatchCalendar {
    let Some(contents) = read_optional(path) else {
        return PatchCalendar::default();
    };

    match serde_json::from_str::<PatchDatesFile>(&contents) {
        Ok(file) => {
            let calendar = PatchCalendar::new(file.patch_dates);
            info!(path = %path.display(), dates = calendar.len(), "patch calendar loaded");
            calendar
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "invalid patch calendar, starting empty");
            PatchCalendar::default()
        }
    }
}

/// Load the Clash calendar from `clash_dates.json`.
///
/// Events without tournament days are dropped with a warning; the non-empty
/// invariant is enforced here so the rule evaluator never has to re-check.
pub fn load_clash_calendar(path: &Path) -> ClashCalendar {
    let Some(contents) = read_optional(path) else {
        return ClashCalendar::default();
    };

    match serde_json::from_str::<ClashDatesFile>(&contents) {
        Ok(file) => {
            let mut events = Vec::with_capacity(file.clash_events.len());
            for event in file.clash_events {
                if event.tournament_days.is_empty() {
                    warn!(event = %event.name, "clash event has no tournament days, skipping");
                    continue;
                }
                events.push(event);
            }
            let calendar = ClashCalendar::new(events);
            info!(path = %path.display(), events = calendar.len(), "clash calendar loaded");
            calendar
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "invalid clash calendar, starting empty");
            ClashCalendar::default()
        }
    }
}

/// Load the static Clash info tables from `clash_info.json`.
pub fn load_clash_info(path: &Path) -> ClashInfo {
    let Some(contents) = read_optional(path) else {
        return ClashInfo::default();
    };

    match serde_json::from_str(&contents) {
        Ok(info) => {
            info!(path = %path.display(), "clash info loaded");
            info
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "invalid clash info, starting empty");
            ClashInfo::default()
        }
    }
}

/// Load the champion roster from `champions.txt` (one name per line).
pub fn load_champion_roster(path: &Path) -> ChampionRoster {
    let Some(contents) = read_optional(path) else {
        return ChampionRoster::default();
    };

    let roster = ChampionRoster::from_lines(contents.lines());
    info!(path = %path.display(), champions = roster.len(), "champion roster loaded");
    roster
}

fn read_optional(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Some(contents),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "data file not found, starting empty");
            None
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read data file, starting empty");
            None
        }
    }
}
