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

pub mod dex;
pub mod library;
pub mod page;
pub mod types;

pub use dex::Dex;
pub use library::Library;
pub use page::{PAGE_SIZE, page_count, page_slice};
pub use types::{Roster, RosterSlot, TEAM_SIZE, TeamRecord};

/// Durable collection of team records.
///
/// `url` is the de-facto key: `update_style` and `delete_by_url` match on
/// it, but `add` does not reject duplicates.
#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn add(&self, record: TeamRecord) -> anyhow::Result<()>;

    /// All records in stable iteration order.
    async fn find_all(&self) -> anyhow::Result<Vec<TeamRecord>>;

    /// Returns `true` when at least one record matched `url`.
    async fn update_style(&self, url: &str, style: &str) -> anyhow::Result<bool>;

    /// Removes every record matching `url`. Returns `true` when any existed.
    async fn delete_by_url(&self, url: &str) -> anyhow::Result<bool>;
}

/// Persistent roster cache keyed by source URL.
#[async_trait]
pub trait RosterCache: Send + Sync {
    async fn lookup(&self, url: &str) -> anyhow::Result<Option<Roster>>;

    /// Idempotent upsert keyed by `url`.
    async fn store(&self, url: &str, roster: &Roster) -> anyhow::Result<()>;

    /// Drops the entry for `url`. Returns `true` when one existed.
    async fn evict(&self, url: &str) -> anyhow::Result<bool>;
}

/// Resolves the roster behind a team's source URL.
///
/// A fetch failure is not an `Err`: it surfaces as a roster of
/// [`RosterSlot::FetchError`] slots so batch callers keep going. `Err` is
/// reserved for infrastructure failures (storage, serialization).
#[async_trait]
pub trait RosterSource: Send + Sync {
    async fn team_roster(&self, url: &str) -> anyhow::Result<Roster>;
}
