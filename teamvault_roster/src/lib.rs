#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;

pub mod client;
pub mod html;
pub mod service;

pub use client::{FetchConfig, PasteClient};
pub use service::RosterService;

/// Fetches the flattened text behind a team-export URL.
///
/// Transport errors and non-success statuses both collapse to `Err`; the
/// roster service maps them to the retryable fetch-error sentinel.
#[async_trait]
pub trait PasteFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> anyhow::Result<String>;
}
