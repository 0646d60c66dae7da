//! Pure trigger evaluation for the reminder rules.
//!
//! Every function here maps `(now, calendar)` to zero-or-more due
//! reminders. No I/O and no ledger access: the tick services apply the
//! already-sent filter and deliver.
//!
//! A trigger is due while `trigger <= now < trigger + window`. The window
//! defaults to the tick interval, so a tick that lands a few seconds late
//! still picks the reminder up; downtime longer than the window misses the
//! reminder permanently, which is accepted behaviour.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Timelike};
use chrono_tz::Tz;
use poroherald_domain::constants::{
    FINAL_CALL_HOUR, FINAL_CALL_MINUTE, FORMATION_REMINDER_HOUR, NOTES_PUBLISHED_HOUR,
    PRE_PATCH_REMINDER_HOUR, RANKED_DISABLE_HOUR, RANKED_DISABLE_MINUTE, TARGET_TZ,
    TOURNAMENT_MORNING_HOUR, UNSCHEDULED_CHECK_EVERY_MINUTES,
};
use poroherald_domain::{ClashCalendar, ClashEvent, PatchCalendar};

/// The pre-patch reminder is due: tomorrow is patch day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrePatchDue {
    pub id: String,
    pub patch_date: NaiveDate,
    /// Patch date at 01:30 local, when ranked queues go down.
    pub ranked_disable_at: DateTime<Tz>,
}

/// The notes-published announcement is due: today is patch day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesPublishedDue {
    pub id: String,
    pub patch_date: NaiveDate,
}

/// A due Clash reminder, one of three kinds per event/day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClashDue {
    pub id: String,
    pub kind: ClashDueKind,
    pub event: ClashEvent,
    /// The tournament day the reminder refers to (formation reminders use
    /// the formation start date).
    pub day: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClashDueKind {
    Formation,
    TournamentMorning,
    FinalCall,
}

/// A local wall-clock instant on `date`, `None` for nonexistent times.
pub fn local_at(date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Tz>> {
    let naive = date.and_hms_opt(hour, minute, 0)?;
    TARGET_TZ.from_local_datetime(&naive).single()
}

fn in_window(now: DateTime<Tz>, trigger: DateTime<Tz>, window: Duration) -> bool {
    now >= trigger && now - trigger < window
}

/// Rule 1: 10:00 the day before each patch date.
///
/// At most one date can be due at any instant, so the first match wins.
pub fn pre_patch_due(
    now: DateTime<Tz>,
    calendar: &PatchCalendar,
    window: Duration,
) -> Option<PrePatchDue> {
    for &patch_date in calendar.dates() {
        let Some(reminder_day) = patch_date.pred_opt() else {
            continue;
        };
        let Some(trigger) = local_at(reminder_day, PRE_PATCH_REMINDER_HOUR, 0) else {
            continue;
        };
        let Some(ranked_disable_at) =
            local_at(patch_date, RANKED_DISABLE_HOUR, RANKED_DISABLE_MINUTE)
        else {
            continue;
        };

        if in_window(now, trigger, window) {
            return Some(PrePatchDue {
                id: format!("{patch_date}-prepatch"),
                patch_date,
                ranked_disable_at,
            });
        }
    }
    None
}

/// Rule 2: midnight on each patch date.
pub fn notes_published_due(
    now: DateTime<Tz>,
    calendar: &PatchCalendar,
    window: Duration,
) -> Option<NotesPublishedDue> {
    for &patch_date in calendar.dates() {
        let Some(trigger) = local_at(patch_date, NOTES_PUBLISHED_HOUR, 0) else {
            continue;
        };

        if in_window(now, trigger, window) {
            return Some(NotesPublishedDue {
                id: format!("{patch_date}-notes-published"),
                patch_date,
            });
        }
    }
    None
}

/// Rule 3: the unscheduled-patch page check runs on the half hour.
pub fn unscheduled_check_due(now: DateTime<Tz>) -> bool {
    now.minute() % UNSCHEDULED_CHECK_EVERY_MINUTES == 0
}

/// Rules 4-6: formation, tournament-morning and final-call reminders.
///
/// Evaluated across all events and all tournament days without
/// short-circuit; reminders for coinciding windows are independent ids.
pub fn clash_due(now: DateTime<Tz>, calendar: &ClashCalendar, window: Duration) -> Vec<ClashDue> {
    let mut due = Vec::new();

    for event in calendar.events() {
        if let Some(trigger) = local_at(event.team_formation_start, FORMATION_REMINDER_HOUR, 0) {
            if in_window(now, trigger, window) {
                due.push(ClashDue {
                    id: format!("{}-{}-formation", event.name, event.team_formation_start),
                    kind: ClashDueKind::Formation,
                    event: event.clone(),
                    day: event.team_formation_start,
                });
            }
        }

        for &day in &event.tournament_days {
            if let Some(trigger) = local_at(day, TOURNAMENT_MORNING_HOUR, 0) {
                if in_window(now, trigger, window) {
                    due.push(ClashDue {
                        id: format!("{}-{}-morning", event.name, day),
                        kind: ClashDueKind::TournamentMorning,
                        event: event.clone(),
                        day,
                    });
                }
            }

            if let Some(trigger) = local_at(day, FINAL_CALL_HOUR, FINAL_CALL_MINUTE) {
                if in_window(now, trigger, window) {
                    due.push(ClashDue {
                        id: format!("{}-{}-final", event.name, day),
                        kind: ClashDueKind::FinalCall,
                        event: event.clone(),
                        day,
                    });
                }
            }
        }
    }

    due
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Tz> {
        local_at(date(y, m, d), h, min).unwrap()
    }

    fn tick() -> Duration {
        Duration::seconds(60)
    }

    fn sample_event() -> ClashEvent {
        ClashEvent {
            name: "Copa X".into(),
            version: "25.13".into(),
            team_formation_start: date(2025, 7, 1),
            tournament_days: vec![date(2025, 7, 5), date(2025, 7, 6)],
        }
    }

    #[test]
    fn pre_patch_fires_at_ten_the_day_before() {
        let calendar = PatchCalendar::new(vec![date(2025, 6, 10)]);
        let due = pre_patch_due(at(2025, 6, 9, 10, 0), &calendar, tick()).unwrap();

        assert_eq!(due.id, "2025-06-10-prepatch");
        assert_eq!(due.patch_date, date(2025, 6, 10));
        assert_eq!(due.ranked_disable_at, at(2025, 6, 10, 1, 30));
    }

    #[test]
    fn pre_patch_remaining_time_reaches_ranked_disable() {
        let calendar = PatchCalendar::new(vec![date(2025, 6, 10)]);
        let now = at(2025, 6, 9, 10, 0);
        let due = pre_patch_due(now, &calendar, tick()).unwrap();

        assert_eq!(due.ranked_disable_at - now, Duration::hours(15) + Duration::minutes(30));
    }

    #[test]
    fn pre_patch_not_due_outside_window() {
        let calendar = PatchCalendar::new(vec![date(2025, 6, 10)]);
        assert!(pre_patch_due(at(2025, 6, 9, 9, 59), &calendar, tick()).is_none());
        assert!(pre_patch_due(at(2025, 6, 9, 10, 1), &calendar, tick()).is_none());
        assert!(pre_patch_due(at(2025, 6, 10, 10, 0), &calendar, tick()).is_none());
    }

    #[test]
    fn pre_patch_window_tolerates_late_ticks() {
        let calendar = PatchCalendar::new(vec![date(2025, 6, 10)]);
        let window = Duration::seconds(90);
        let late = at(2025, 6, 9, 10, 1);

        assert!(pre_patch_due(late, &calendar, window).is_some());
        assert!(pre_patch_due(late, &calendar, tick()).is_none());
    }

    #[test]
    fn notes_published_fires_at_midnight_of_patch_day() {
        let calendar = PatchCalendar::new(vec![date(2025, 6, 10)]);
        let due = notes_published_due(at(2025, 6, 10, 0, 0), &calendar, tick()).unwrap();

        assert_eq!(due.id, "2025-06-10-notes-published");
        assert!(notes_published_due(at(2025, 6, 10, 0, 1), &calendar, tick()).is_none());
    }

    #[test]
    fn only_the_matching_date_is_due() {
        let calendar = PatchCalendar::new(vec![date(2025, 6, 10), date(2025, 6, 24)]);
        let due = pre_patch_due(at(2025, 6, 23, 10, 0), &calendar, tick()).unwrap();
        assert_eq!(due.patch_date, date(2025, 6, 24));
    }

    #[test]
    fn unscheduled_check_runs_on_half_hours() {
        assert!(unscheduled_check_due(at(2025, 6, 9, 14, 0)));
        assert!(unscheduled_check_due(at(2025, 6, 9, 14, 30)));
        assert!(!unscheduled_check_due(at(2025, 6, 9, 14, 29)));
    }

    #[test]
    fn formation_reminder_fires_on_formation_day() {
        let calendar = ClashCalendar::new(vec![sample_event()]);
        let due = clash_due(at(2025, 7, 1, 10, 0), &calendar, tick());

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, "Copa X-2025-07-01-formation");
        assert_eq!(due[0].kind, ClashDueKind::Formation);
    }

    #[test]
    fn final_call_fires_at_1850() {
        let calendar = ClashCalendar::new(vec![sample_event()]);
        let due = clash_due(at(2025, 7, 5, 18, 50), &calendar, tick());

        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, "Copa X-2025-07-05-final");
        assert_eq!(due[0].kind, ClashDueKind::FinalCall);
    }

    #[test]
    fn final_call_does_not_refire_at_1900() {
        let calendar = ClashCalendar::new(vec![sample_event()]);
        assert!(clash_due(at(2025, 7, 5, 19, 0), &calendar, tick()).is_empty());
    }

    #[test]
    fn morning_reminder_fires_on_each_tournament_day() {
        let calendar = ClashCalendar::new(vec![sample_event()]);

        let first = clash_due(at(2025, 7, 5, 10, 0), &calendar, tick());
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].id, "Copa X-2025-07-05-morning");

        let second = clash_due(at(2025, 7, 6, 10, 0), &calendar, tick());
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id, "Copa X-2025-07-06-morning");
    }

    #[test]
    fn coinciding_events_all_fire_in_one_tick() {
        let mut other = sample_event();
        other.name = "Copa Y".into();
        let calendar = ClashCalendar::new(vec![sample_event(), other]);

        let due = clash_due(at(2025, 7, 1, 10, 0), &calendar, tick());
        let mut ids: Vec<_> = due.iter().map(|d| d.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, ["Copa X-2025-07-01-formation", "Copa Y-2025-07-01-formation"]);
    }

    #[test]
    fn formation_overlapping_morning_yields_both() {
        // Formation start can coincide with a tournament day of another cycle
        let mut event = sample_event();
        event.tournament_days = vec![event.team_formation_start];

        let calendar = ClashCalendar::new(vec![event]);
        let due = clash_due(at(2025, 7, 1, 10, 0), &calendar, tick());

        let kinds: Vec<_> = due.iter().map(|d| d.kind).collect();
        assert!(kinds.contains(&ClashDueKind::Formation));
        assert!(kinds.contains(&ClashDueKind::TournamentMorning));
    }
}
