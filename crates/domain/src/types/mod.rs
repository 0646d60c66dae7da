//! Domain types and models

pub mod calendar;
pub mod message;
pub mod patch;
pub mod reminder;

pub use calendar::{
    ChampionRoster, ClashCalendar, ClashEvent, ClashInfo, PatchCalendar, PrizeTable, PrizeTier,
    ScheduleTable, ScheduleTier,
};
pub use message::{color, Embed, EmbedField, Message};
pub use patch::{ChampionChanges, ChangeBlock, PatchArticle, PatchSection};
pub use reminder::{ReminderDomain, ReminderLedger};
