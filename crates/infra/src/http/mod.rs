//! Shared HTTP client with timeout and retry semantics.

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
