//! Scheduler lifecycle: start/stop/restart and invalid transitions.

use std::sync::Arc;

use chrono::Duration;
use poroherald_core::{ClashReminderConfig, ClashReminderService};
use poroherald_domain::{ClashCalendar, ClashInfo};
use poroherald_infra::{
    ClashScheduler, DiscordMessenger, JsonLedgerStore, SchedulerError, SystemClock,
};

/// A service whose ticks are silent skips: empty channel, empty calendar.
/// Good enough to exercise the scheduler lifecycle without network traffic.
fn idle_service(dir: &tempfile::TempDir) -> Arc<ClashReminderService> {
    let messenger =
        DiscordMessenger::with_api_base("test-token", "http://127.0.0.1:9").expect("messenger");

    Arc::new(ClashReminderService::new(
        ClashReminderConfig { channel_id: String::new(), due_window: Duration::seconds(60) },
        Arc::new(ClashCalendar::default()),
        Arc::new(ClashInfo::default()),
        Arc::new(SystemClock),
        Arc::new(messenger),
        Arc::new(JsonLedgerStore::load(dir.path().join("sent_reminders.json"))),
    ))
}

#[tokio::test(flavor = "multi_thread")]
async fn lifecycle_runs_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let mut scheduler = ClashScheduler::new(idle_service(&dir));

    scheduler.start().await.expect("start succeeds");
    assert!(scheduler.is_running());

    scheduler.stop().await.expect("stop succeeds");
    assert!(!scheduler.is_running());
}

#[tokio::test(flavor = "multi_thread")]
async fn double_start_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut scheduler = ClashScheduler::new(idle_service(&dir));

    scheduler.start().await.expect("first start");
    let err = scheduler.start().await.expect_err("second start fails");
    assert!(matches!(err, SchedulerError::AlreadyRunning));

    scheduler.stop().await.expect("stop succeeds");
}

#[tokio::test(flavor = "multi_thread")]
async fn stop_without_start_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut scheduler = ClashScheduler::new(idle_service(&dir));

    let err = scheduler.stop().await.expect_err("stop fails");
    assert!(matches!(err, SchedulerError::NotRunning));
}

#[tokio::test(flavor = "multi_thread")]
async fn restart_after_stop_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let mut scheduler = ClashScheduler::new(idle_service(&dir));

    scheduler.start().await.expect("start succeeds");
    scheduler.stop().await.expect("stop succeeds");

    scheduler.start().await.expect("start again");
    scheduler.stop().await.expect("stop again");
}
