//! Mock port implementations for testing
//!
//! Provides in-memory mocks for all reminder/lookup ports, enabling
//! deterministic tests without network or filesystem dependencies.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone};
use chrono_tz::Tz;
use poroherald_core::{Clock, LastSeenPatchStore, Messenger, PatchFeed, SentReminderStore};
use poroherald_domain::constants::TARGET_TZ;
use poroherald_domain::{
    ChampionChanges, ChangeBlock, HeraldError, Message, PatchArticle, PatchSection,
    ReminderDomain, ReminderLedger, Result as DomainResult,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
    TARGET_TZ
        .from_local_datetime(&date(y, m, d).and_hms_opt(h, min, 0).unwrap())
        .single()
        .unwrap()
}

/// Clock pinned to a fixed instant.
pub struct FixedClock {
    now: DateTime<Tz>,
}

impl FixedClock {
    pub fn at(now: DateTime<Tz>) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Tz> {
        self.now
    }
}

/// Messenger that records every delivery, optionally failing all sends.
#[derive(Default)]
pub struct RecordingMessenger {
    pub sent: Mutex<Vec<(String, Message)>>,
    pub fail: bool,
}

impl RecordingMessenger {
    pub fn failing() -> Self {
        Self { sent: Mutex::new(Vec::new()), fail: true }
    }

    pub fn messages(&self) -> Vec<Message> {
        self.sent.lock().unwrap().iter().map(|(_, m)| m.clone()).collect()
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    async fn send(&self, channel_id: &str, message: Message) -> DomainResult<()> {
        if self.fail {
            return Err(HeraldError::Channel("simulated delivery failure".into()));
        }
        self.sent.lock().unwrap().push((channel_id.to_string(), message));
        Ok(())
    }
}

/// In-memory ledger with an optional persistence-failure mode.
///
/// `fail_persist` mimics the write-through store whose file write fails:
/// the id is still recorded in memory but `record` returns an error.
#[derive(Default)]
pub struct InMemoryLedger {
    state: Mutex<ReminderLedger>,
    pub fail_persist: bool,
}

impl InMemoryLedger {
    pub fn with_ids(domain: ReminderDomain, ids: &[&str]) -> Self {
        let mut ledger = ReminderLedger::default();
        for id in ids {
            ledger.insert(domain, id);
        }
        Self { state: Mutex::new(ledger), fail_persist: false }
    }

    pub fn failing_persist() -> Self {
        Self { state: Mutex::new(ReminderLedger::default()), fail_persist: true }
    }

    pub fn snapshot(&self) -> ReminderLedger {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait]
impl SentReminderStore for InMemoryLedger {
    async fn has(&self, domain: ReminderDomain, id: &str) -> bool {
        self.state.lock().unwrap().contains(domain, id)
    }

    async fn record(&self, domain: ReminderDomain, id: &str) -> DomainResult<()> {
        self.state.lock().unwrap().insert(domain, id);
        if self.fail_persist {
            return Err(HeraldError::Storage("simulated persistence failure".into()));
        }
        Ok(())
    }
}

/// Single-slot last-seen URL store.
#[derive(Default)]
pub struct InMemoryLastSeen {
    url: Mutex<Option<String>>,
}

impl InMemoryLastSeen {
    pub fn seeded(url: &str) -> Self {
        Self { url: Mutex::new(Some(url.to_string())) }
    }

    pub fn current(&self) -> Option<String> {
        self.url.lock().unwrap().clone()
    }
}

#[async_trait]
impl LastSeenPatchStore for InMemoryLastSeen {
    async fn get(&self) -> Option<String> {
        self.url.lock().unwrap().clone()
    }

    async fn set(&self, url: &str) -> DomainResult<()> {
        *self.url.lock().unwrap() = Some(url.to_string());
        Ok(())
    }
}

/// Canned patch feed.
#[derive(Default)]
pub struct StubPatchFeed {
    pub latest: Option<PatchArticle>,
    pub image: Option<String>,
    pub champions: Vec<String>,
    pub champion_changes: Option<ChampionChanges>,
    pub sections: Vec<ChangeBlock>,
    /// When set, every call returns a network error.
    pub unreachable: bool,
}

impl StubPatchFeed {
    pub fn with_article(title: &str, url: &str) -> Self {
        Self {
            latest: Some(PatchArticle {
                title: title.to_string(),
                url: url.to_string(),
                published: None,
            }),
            ..Self::default()
        }
    }

    pub fn unreachable() -> Self {
        Self { unreachable: true, ..Self::default() }
    }

    fn guard(&self) -> DomainResult<()> {
        if self.unreachable {
            Err(HeraldError::Network("simulated fetch failure".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl PatchFeed for StubPatchFeed {
    async fn latest_patch(&self) -> DomainResult<Option<PatchArticle>> {
        self.guard()?;
        Ok(self.latest.clone())
    }

    async fn summary_image(&self, _patch_url: &str) -> DomainResult<Option<String>> {
        self.guard()?;
        Ok(self.image.clone())
    }

    async fn champion_list(&self, _patch_url: &str) -> DomainResult<Vec<String>> {
        self.guard()?;
        Ok(self.champions.clone())
    }

    async fn champion_changes(
        &self,
        _patch_url: &str,
        _champion: &str,
    ) -> DomainResult<Option<ChampionChanges>> {
        self.guard()?;
        Ok(self.champion_changes.clone())
    }

    async fn section_changes(
        &self,
        _patch_url: &str,
        _section: PatchSection,
    ) -> DomainResult<Vec<ChangeBlock>> {
        self.guard()?;
        Ok(self.sections.clone())
    }
}
