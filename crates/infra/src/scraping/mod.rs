//! Patch-notes site scraping.

pub mod news_client;

pub use news_client::LolNewsClient;
