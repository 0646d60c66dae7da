//! # PoroHerald Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The reminder rule evaluator (pure functions over calendar + clock)
//! - Tick services driving the patch and Clash reminder flows
//! - Lookup services backing the on-demand chat commands
//! - Port/adapter interfaces (traits)
//!
//! ## Architecture Principles
//! - Only depends on `poroherald-domain`
//! - No file, HTTP, or chat-platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod lookup;
pub mod reminders;
pub mod text;

pub use lookup::{ClashLookupService, PatchLookupService};
pub use reminders::ports::{
    Clock, LastSeenPatchStore, Messenger, PatchFeed, SentReminderStore,
};
pub use reminders::{
    ClashReminderConfig, ClashReminderService, PatchReminderConfig, PatchReminderService,
};
