//! Calendar types loaded once at startup: patch dates, Clash events and the
//! static Clash info tables.
//!
//! All of these are read-only after load. Ordering invariants (ascending
//! dates) are enforced by the constructors rather than trusted from disk.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordered list of expected patch-release dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchCalendar {
    dates: Vec<NaiveDate>,
}

impl PatchCalendar {
    /// Build a calendar, sorting the dates ascending.
    pub fn new(mut dates: Vec<NaiveDate>) -> Self {
        dates.sort_unstable();
        Self { dates }
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// First patch date strictly after `date`.
    pub fn next_after(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.dates.iter().copied().find(|d| *d > date)
    }

    /// All patch dates strictly after `date`, in order.
    pub fn upcoming(&self, date: NaiveDate) -> Vec<NaiveDate> {
        self.dates.iter().copied().filter(|d| *d > date).collect()
    }
}

/// One Clash tournament cycle.
///
/// `tournament_days` holds 1-2 dates; the loader warns on empty events and
/// drops them rather than failing startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClashEvent {
    pub name: String,
    pub version: String,
    pub team_formation_start: NaiveDate,
    pub tournament_days: Vec<NaiveDate>,
}

impl ClashEvent {
    /// First tournament day, if any.
    pub fn first_tournament_day(&self) -> Option<NaiveDate> {
        self.tournament_days.first().copied()
    }
}

/// Ordered list of Clash events for the season.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClashCalendar {
    events: Vec<ClashEvent>,
}

impl ClashCalendar {
    /// Build a calendar, sorting events by `team_formation_start` ascending.
    pub fn new(mut events: Vec<ClashEvent>) -> Self {
        events.sort_by_key(|e| e.team_formation_start);
        Self { events }
    }

    pub fn events(&self) -> &[ClashEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// First event whose team formation starts strictly after `date`.
    pub fn next_after(&self, date: NaiveDate) -> Option<&ClashEvent> {
        self.events.iter().find(|e| e.team_formation_start > date)
    }

    /// All events whose team formation starts strictly after `date`.
    pub fn upcoming(&self, date: NaiveDate) -> Vec<&ClashEvent> {
        self.events.iter().filter(|e| e.team_formation_start > date).collect()
    }
}

/// Static Clash info tables (confirmation schedules and prize tiers).
///
/// Field names map onto the Spanish keys of `clash_info.json`, which is
/// maintained by the community moderators.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClashInfo {
    #[serde(rename = "horarios", default)]
    pub schedules: Option<ScheduleTable>,
    #[serde(rename = "premios", default)]
    pub prizes: Option<PrizeTable>,
}

impl ClashInfo {
    /// Reward text for the first-place tier, when configured.
    pub fn first_prize(&self) -> Option<&str> {
        self.prizes
            .as_ref()
            .and_then(|p| p.entries.first())
            .map(|tier| tier.reward.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleTable {
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "niveles", default)]
    pub tiers: Vec<ScheduleTier>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleTier {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "horario")]
    pub hours: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrizeTable {
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "lista", default)]
    pub entries: Vec<PrizeTier>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrizeTier {
    #[serde(rename = "lugar")]
    pub place: String,
    #[serde(rename = "recompensa")]
    pub reward: String,
}

/// Set of valid champion names, used to validate lookup arguments before
/// spending a network round-trip.
#[derive(Debug, Clone, Default)]
pub struct ChampionRoster {
    names: HashSet<String>,
}

impl ChampionRoster {
    /// Build a roster from raw lines (one champion per line).
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = lines
            .into_iter()
            .map(|line| line.as_ref().trim().to_lowercase())
            .filter(|line| !line.is_empty())
            .collect();
        Self { names }
    }

    /// Membership check, case- and whitespace-insensitive.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.trim().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}
