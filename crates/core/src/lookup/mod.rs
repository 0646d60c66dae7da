//! On-demand lookup services backing the chat commands.
//!
//! Lookup services read the calendars and the patch feed only; they never
//! touch the reminder ledger, so they can interleave freely with the
//! scheduled ticks.

pub mod clash;
pub mod help;
pub mod patch;

pub use clash::ClashLookupService;
pub use help::help_message;
pub use patch::PatchLookupService;
