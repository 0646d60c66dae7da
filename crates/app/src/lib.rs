//! # PoroHerald App
//!
//! Composition root: configuration bootstrap, dependency wiring, command
//! routing and the gateway consumption loop live here. Everything
//! interesting is delegated to `poroherald-core` services through the
//! implementations in `poroherald-infra`.

pub mod commands;
pub mod context;

pub use commands::{parse, Command, CommandRouter};
pub use context::AppContext;
