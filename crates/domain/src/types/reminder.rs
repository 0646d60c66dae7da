//! Reminder ledger types.
//!
//! A reminder id is a deterministic string built from the triggering
//! entity's natural key plus a kind tag (for example `2025-06-10-prepatch`
//! or `Copa X-2025-07-05-final`). The ledger records every id ever sent so
//! a reminder is delivered at most once, across restarts.

use serde::{Deserialize, Serialize};

/// Which id namespace a reminder belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderDomain {
    Patch,
    Clash,
}

/// Set of reminder ids already sent, split by domain.
///
/// Serialises to the persisted layout:
/// `{"patch_reminders_sent": [...], "clash_reminders_sent": [...]}`.
/// Insertion order is preserved so the file stays diffable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReminderLedger {
    #[serde(default)]
    pub patch_reminders_sent: Vec<String>,
    #[serde(default)]
    pub clash_reminders_sent: Vec<String>,
}

impl ReminderLedger {
    pub fn contains(&self, domain: ReminderDomain, id: &str) -> bool {
        self.ids(domain).iter().any(|sent| sent == id)
    }

    /// Record an id. Returns `true` if it was newly inserted, `false` when
    /// the id was already present (recording is idempotent).
    pub fn insert(&mut self, domain: ReminderDomain, id: &str) -> bool {
        if self.contains(domain, id) {
            return false;
        }
        self.ids_mut(domain).push(id.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.patch_reminders_sent.len() + self.clash_reminders_sent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patch_reminders_sent.is_empty() && self.clash_reminders_sent.is_empty()
    }

    fn ids(&self, domain: ReminderDomain) -> &[String] {
        match domain {
            ReminderDomain::Patch => &self.patch_reminders_sent,
            ReminderDomain::Clash => &self.clash_reminders_sent,
        }
    }

    fn ids_mut(&mut self, domain: ReminderDomain) -> &mut Vec<String> {
        match domain {
            ReminderDomain::Patch => &mut self.patch_reminders_sent,
            ReminderDomain::Clash => &mut self.clash_reminders_sent,
        }
    }
}
