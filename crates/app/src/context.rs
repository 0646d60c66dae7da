//! Application context - dependency injection container
//!
//! Calendars, stores, services and schedulers are constructed once at
//! startup and owned here; nothing in the system reaches for ambient
//! globals.

use std::sync::Arc;

use chrono::Duration;
use poroherald_core::{
    ClashLookupService, ClashReminderConfig, ClashReminderService, PatchLookupService,
    PatchReminderConfig, PatchReminderService,
};
use poroherald_domain::{AppConfig, Result};
use poroherald_infra::config::{
    load_champion_roster, load_clash_calendar, load_clash_info, load_patch_calendar,
};
use poroherald_infra::{
    ClashScheduler, DiscordMessenger, HttpClient, JsonLedgerStore, LastSeenUrlStore,
    LolNewsClient, PatchScheduler, SystemClock,
};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: AppConfig,
    pub messenger: Arc<DiscordMessenger>,
    pub patch_lookup: Arc<PatchLookupService>,
    pub clash_lookup: Arc<ClashLookupService>,

    patch_scheduler: PatchScheduler,
    clash_scheduler: ClashScheduler,
}

impl AppContext {
    /// Wire the full dependency graph from the loaded configuration.
    pub fn new(config: AppConfig) -> Result<Self> {
        let data = &config.data;

        // Static data, loaded once; missing files degrade to empty defaults.
        let patch_calendar = Arc::new(load_patch_calendar(&data.patch_dates_path()));
        let clash_calendar = Arc::new(load_clash_calendar(&data.clash_dates_path()));
        let clash_info = Arc::new(load_clash_info(&data.clash_info_path()));
        let roster = Arc::new(load_champion_roster(&data.champions_path()));

        // Ports
        let clock = Arc::new(SystemClock);
        let feed = Arc::new(LolNewsClient::new(HttpClient::new()?));
        let messenger = Arc::new(DiscordMessenger::new(&config.discord.token)?);
        let ledger = Arc::new(JsonLedgerStore::load(data.ledger_path()));
        let last_seen = Arc::new(LastSeenUrlStore::load(data.last_patch_url_path()));

        let due_window = Duration::seconds(config.reminders.due_window_seconds as i64);

        let patch_service = Arc::new(PatchReminderService::new(
            PatchReminderConfig {
                channel_id: config.discord.channel_id.clone(),
                due_window,
            },
            patch_calendar.clone(),
            clock.clone(),
            feed.clone(),
            messenger.clone(),
            ledger.clone(),
            last_seen,
        ));
        let clash_service = Arc::new(ClashReminderService::new(
            ClashReminderConfig {
                channel_id: config.discord.channel_id.clone(),
                due_window,
            },
            clash_calendar.clone(),
            clash_info.clone(),
            clock.clone(),
            messenger.clone(),
            ledger,
        ));

        let patch_lookup = Arc::new(PatchLookupService::new(
            patch_calendar,
            roster,
            clock.clone(),
            feed,
        ));
        let clash_lookup =
            Arc::new(ClashLookupService::new(clash_calendar, clash_info, clock));

        Ok(Self {
            config,
            messenger,
            patch_lookup,
            clash_lookup,
            patch_scheduler: PatchScheduler::new(patch_service),
            clash_scheduler: ClashScheduler::new(clash_service),
        })
    }

    /// Start both reminder schedulers (fail-fast on registration errors).
    pub async fn start_schedulers(&mut self) -> Result<()> {
        self.patch_scheduler.start().await?;
        self.clash_scheduler.start().await?;
        info!("reminder schedulers running");
        Ok(())
    }

    /// Stop both schedulers; used during graceful shutdown.
    pub async fn stop_schedulers(&mut self) -> Result<()> {
        self.patch_scheduler.stop().await?;
        self.clash_scheduler.stop().await?;
        Ok(())
    }
}
