//! Router behaviour over real lookup services with stubbed ports.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;
use poroherald_app::CommandRouter;
use poroherald_core::{ClashLookupService, Clock, PatchFeed, PatchLookupService};
use poroherald_domain::constants::TARGET_TZ;
use poroherald_domain::{
    ChampionChanges, ChampionRoster, ChangeBlock, ClashCalendar, ClashEvent, ClashInfo,
    HeraldError, PatchArticle, PatchCalendar, PatchSection, Result,
};

struct FixedClock(chrono::DateTime<Tz>);

impl Clock for FixedClock {
    fn now(&self) -> chrono::DateTime<Tz> {
        self.0
    }
}

struct OfflineFeed;

#[async_trait]
impl PatchFeed for OfflineFeed {
    async fn latest_patch(&self) -> Result<Option<PatchArticle>> {
        Err(HeraldError::Network("offline".into()))
    }

    async fn summary_image(&self, _patch_url: &str) -> Result<Option<String>> {
        Err(HeraldError::Network("offline".into()))
    }

    async fn champion_list(&self, _patch_url: &str) -> Result<Vec<String>> {
        Err(HeraldError::Network("offline".into()))
    }

    async fn champion_changes(
        &self,
        _patch_url: &str,
        _champion: &str,
    ) -> Result<Option<ChampionChanges>> {
        Err(HeraldError::Network("offline".into()))
    }

    async fn section_changes(
        &self,
        _patch_url: &str,
        _section: PatchSection,
    ) -> Result<Vec<ChangeBlock>> {
        Err(HeraldError::Network("offline".into()))
    }
}

fn router() -> CommandRouter {
    let now = TARGET_TZ
        .from_local_datetime(
            &NaiveDate::from_ymd_opt(2025, 6, 29)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
        .single()
        .unwrap();

    let clock = Arc::new(FixedClock(now));
    let patch = Arc::new(PatchLookupService::new(
        Arc::new(PatchCalendar::new(vec![NaiveDate::from_ymd_opt(2025, 7, 8).unwrap()])),
        Arc::new(ChampionRoster::from_lines(["ahri"])),
        clock.clone(),
        Arc::new(OfflineFeed),
    ));
    let clash = Arc::new(ClashLookupService::new(
        Arc::new(ClashCalendar::new(vec![ClashEvent {
            name: "Copa X".into(),
            version: "25.13".into(),
            team_formation_start: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            tournament_days: vec![NaiveDate::from_ymd_opt(2025, 7, 5).unwrap()],
        }])),
        Arc::new(ClashInfo::default()),
        clock,
    ));

    CommandRouter::new(patch, clash)
}

#[tokio::test]
async fn non_commands_get_no_reply() {
    let router = router();
    assert!(router.handle("gg wp").await.is_none());
    assert!(router.handle("p!desconocido").await.is_none());
}

#[tokio::test]
async fn ayuda_replies_with_the_help_embed() {
    let router = router();
    let reply = router.handle("!ayuda").await.expect("reply");
    assert_eq!(reply.embeds[0].title.as_deref(), Some("Ayuda - El Rincón del Poro"));
}

#[tokio::test]
async fn ver_without_argument_gets_usage_hint() {
    let router = router();
    let reply = router.handle("p!ver").await.expect("reply");
    assert!(reply.content.unwrap().contains("p!ver Ahri"));
}

#[tokio::test]
async fn feed_outage_degrades_to_friendly_text() {
    let router = router();
    let reply = router.handle("p!parche").await.expect("reply");
    assert!(reply.content.unwrap().contains("No se pudo obtener"));
}

#[tokio::test]
async fn calendar_commands_work_without_the_feed() {
    let router = router();

    let patches = router.handle("p!siguiente").await.expect("reply");
    assert!(patches.embeds[0].description.as_deref().unwrap().contains("8 de julio de 2025"));

    let clash = router.handle("c!clash").await.expect("reply");
    assert_eq!(clash.embeds[0].title.as_deref(), Some("🏆 Próximo Clash: Copa X"));
}
