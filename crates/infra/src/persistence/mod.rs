//! Durable state: the reminder ledger and the last-seen patch URL.
//!
//! Both stores are tiny and rewritten wholesale on every mutation. Writes go
//! through a temp-file-then-rename so a crash mid-write never corrupts the
//! previously recorded state.

pub mod last_seen_store;
pub mod ledger_store;

pub use last_seen_store::LastSeenUrlStore;
pub use ledger_store::JsonLedgerStore;
