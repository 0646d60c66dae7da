//! Patch reminder tick service.
//!
//! One call to [`PatchReminderService::run_tick`] evaluates the three
//! patch-related rules in fixed order: pre-patch reminder, notes-published
//! announcement, unscheduled-patch detection. The first two are gated on
//! the reminder ledger; the third dedups on the persisted last-seen URL.

use std::sync::Arc;

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use poroherald_domain::constants::RANKED_DISABLE_MINUTE;
use poroherald_domain::{color, Embed, Message, PatchCalendar, ReminderDomain, Result};
use tracing::{debug, info, warn};

use super::ports::{Clock, LastSeenPatchStore, Messenger, PatchFeed, SentReminderStore};
use super::rules::{self, PrePatchDue};
use crate::text;

/// Configuration for the patch tick service.
#[derive(Debug, Clone)]
pub struct PatchReminderConfig {
    /// Output channel; an empty value makes every tick a silent skip.
    pub channel_id: String,
    /// How long past its trigger instant a reminder is still due.
    pub due_window: Duration,
}

/// Drives the patch-related reminder rules once per scheduler tick.
pub struct PatchReminderService {
    config: PatchReminderConfig,
    calendar: Arc<PatchCalendar>,
    clock: Arc<dyn Clock>,
    feed: Arc<dyn PatchFeed>,
    messenger: Arc<dyn Messenger>,
    ledger: Arc<dyn SentReminderStore>,
    last_seen: Arc<dyn LastSeenPatchStore>,
}

impl PatchReminderService {
    pub fn new(
        config: PatchReminderConfig,
        calendar: Arc<PatchCalendar>,
        clock: Arc<dyn Clock>,
        feed: Arc<dyn PatchFeed>,
        messenger: Arc<dyn Messenger>,
        ledger: Arc<dyn SentReminderStore>,
        last_seen: Arc<dyn LastSeenPatchStore>,
    ) -> Self {
        Self { config, calendar, clock, feed, messenger, ledger, last_seen }
    }

    /// Evaluate all patch rules against the current instant.
    ///
    /// Failures in one check are logged and never prevent the remaining
    /// checks from running; the scheduler keeps ticking regardless.
    pub async fn run_tick(&self) -> Result<()> {
        if self.config.channel_id.is_empty() {
            debug!("no output channel configured, skipping patch tick");
            return Ok(());
        }

        let now = self.clock.now();

        if let Err(err) = self.check_pre_patch(now).await {
            warn!(error = %err, "pre-patch check failed");
        }
        if let Err(err) = self.check_notes_published(now).await {
            warn!(error = %err, "notes-published check failed");
        }
        if let Err(err) = self.check_unscheduled(now).await {
            warn!(error = %err, "unscheduled-patch check failed");
        }

        Ok(())
    }

    async fn check_pre_patch(&self, now: DateTime<Tz>) -> Result<()> {
        let Some(due) = rules::pre_patch_due(now, &self.calendar, self.config.due_window) else {
            return Ok(());
        };
        if self.ledger.has(ReminderDomain::Patch, &due.id).await {
            return Ok(());
        }

        let message = pre_patch_message(&due, now);
        self.messenger.send(&self.config.channel_id, message).await?;

        if let Err(err) = self.ledger.record(ReminderDomain::Patch, &due.id).await {
            warn!(id = %due.id, error = %err, "failed to persist pre-patch reminder id");
        }
        info!(id = %due.id, "pre-patch reminder delivered");
        Ok(())
    }

    async fn check_notes_published(&self, now: DateTime<Tz>) -> Result<()> {
        let Some(due) = rules::notes_published_due(now, &self.calendar, self.config.due_window)
        else {
            return Ok(());
        };
        if self.ledger.has(ReminderDomain::Patch, &due.id).await {
            return Ok(());
        }

        // Only announce once the site actually serves notes for this patch
        // date; otherwise leave the id unrecorded so the next tick inside
        // the window retries.
        let Some(article) = self.feed.latest_patch().await? else {
            debug!(id = %due.id, "patch feed unavailable, retrying next tick");
            return Ok(());
        };
        if !article.matches_date(due.patch_date) {
            debug!(id = %due.id, url = %article.url, "patch notes not yet published");
            return Ok(());
        }

        let message = notes_published_message(&article.title, &article.url);
        self.messenger.send(&self.config.channel_id, message).await?;

        if let Err(err) = self.ledger.record(ReminderDomain::Patch, &due.id).await {
            warn!(id = %due.id, error = %err, "failed to persist notes-published reminder id");
        }
        info!(id = %due.id, "notes-published announcement delivered");
        Ok(())
    }

    async fn check_unscheduled(&self, now: DateTime<Tz>) -> Result<()> {
        if !rules::unscheduled_check_due(now) {
            return Ok(());
        }

        let Some(article) = self.feed.latest_patch().await? else {
            return Ok(());
        };

        let last = self.last_seen.get().await;
        if last.as_deref() == Some(article.url.as_str()) {
            return Ok(());
        }

        info!(url = %article.url, "new patch detected on the news feed");
        let image = self.feed.summary_image(&article.url).await.ok().flatten();
        let message = unscheduled_patch_message(&article.title, &article.url, article.published, image);
        self.messenger.send(&self.config.channel_id, message).await?;

        // The stored URL is the dedup key; persist only after delivery so a
        // failed send is retried on the next half-hour check.
        if let Err(err) = self.last_seen.set(&article.url).await {
            warn!(error = %err, "failed to persist last-seen patch URL");
        }
        Ok(())
    }
}

fn pre_patch_message(due: &PrePatchDue, now: DateTime<Tz>) -> Message {
    let remaining = due.ranked_disable_at - now;
    Message::embed(
        Embed::new()
            .title("⏰ ¡Recordatorio de Parche!")
            .description(format!(
                "Mañana, **{}**, es día de parche. Las colas clasificatorias se \
                 desactivarán aproximadamente a la 1:{} AM (CDMX).",
                text::format_day_month(due.patch_date),
                RANKED_DISABLE_MINUTE,
            ))
            .color(color::ORANGE)
            .field("Tiempo Restante para la Desactivación", text::format_duration(remaining)),
    )
}

fn notes_published_message(title: &str, url: &str) -> Message {
    Message::embed(
        Embed::new()
            .title("✅ ¡Notas del Parche ya Disponibles!")
            .description(format!("Ya puedes consultar las notas de la versión **{title}**."))
            .color(color::GREEN)
            .url(url),
    )
}

fn unscheduled_patch_message(
    title: &str,
    url: &str,
    published: Option<chrono::NaiveDate>,
    image: Option<String>,
) -> Message {
    let description = match published {
        Some(date) => format!("**{title}** - Publicado el {}", text::format_short_date(date)),
        None => format!("**{title}**"),
    };

    let mut embed = Embed::new()
        .title("¡Nuevas Notas de Parche Disponibles!")
        .description(description)
        .color(color::GOLD)
        .url(url);
    if let Some(image_url) = image {
        embed = embed.image(image_url);
    }
    Message::embed(embed)
}
