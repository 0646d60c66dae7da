//! Port interfaces for the reminder engine and lookup commands
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;
use poroherald_domain::{
    ChampionChanges, ChangeBlock, Message, PatchArticle, PatchSection, ReminderDomain, Result,
};

/// Source of the current instant, always in the target timezone.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Tz>;
}

/// Outbound message delivery to the chat platform.
///
/// Delivery is fire-and-forget from the core's perspective: failures are
/// surfaced as errors for the caller to log, never retried here.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, channel_id: &str, message: Message) -> Result<()>;
}

/// Lookups against the patch-notes news site.
///
/// Transient fetch failures are represented as `Ok(None)` or empty
/// collections so scheduled checks can skip the tick without special-casing.
#[async_trait]
pub trait PatchFeed: Send + Sync {
    /// Most recent patch-notes article on the feed, if reachable.
    async fn latest_patch(&self) -> Result<Option<PatchArticle>>;

    /// Summary-graphic image URL embedded in the article, if present.
    async fn summary_image(&self, patch_url: &str) -> Result<Option<String>>;

    /// Names of champions with changes in the article, in page order.
    async fn champion_list(&self, patch_url: &str) -> Result<Vec<String>>;

    /// Full change blocks for one champion, `None` when unchanged.
    async fn champion_changes(
        &self,
        patch_url: &str,
        champion: &str,
    ) -> Result<Option<ChampionChanges>>;

    /// Change blocks for a non-champion section (items, runes).
    async fn section_changes(
        &self,
        patch_url: &str,
        section: PatchSection,
    ) -> Result<Vec<ChangeBlock>>;
}

/// Durable set of reminder ids already delivered.
#[async_trait]
pub trait SentReminderStore: Send + Sync {
    async fn has(&self, domain: ReminderDomain, id: &str) -> bool;

    /// Record an id and persist write-through. Recording an already-present
    /// id is a no-op.
    async fn record(&self, domain: ReminderDomain, id: &str) -> Result<()>;
}

/// Single-slot store for the last patch URL seen by the unscheduled check.
#[async_trait]
pub trait LastSeenPatchStore: Send + Sync {
    async fn get(&self) -> Option<String>;

    async fn set(&self, url: &str) -> Result<()>;
}
