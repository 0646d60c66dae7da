//! Configuration and static-data loading.

pub mod calendars;
pub mod loader;

pub use calendars::{
    load_champion_roster, load_clash_calendar, load_clash_info, load_patch_calendar,
};
pub use loader::{load, load_from_env, load_from_file};
