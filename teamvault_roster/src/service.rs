//! Cache-fronted roster resolution.

use std::sync::Arc;

use async_trait::async_trait;
use teamvault_core::{Dex, Roster, RosterCache, RosterSource};
use tracing::{info, warn};

use crate::PasteFetcher;

/// Resolves team rosters with a write-once cache in front of the
/// fetch+extract path.
///
/// Extraction outcomes are a stable property of the document and are
/// cached, partially recognized rosters included. A failed fetch resolves
/// to the sentinel roster and is never written back, so a transient outage
/// can be retried once the source is reachable again.
pub struct RosterService {
    fetcher: Arc<dyn PasteFetcher>,
    cache: Arc<dyn RosterCache>,
    dex: Arc<Dex>,
}

impl RosterService {
    #[must_use]
    pub fn new(fetcher: Arc<dyn PasteFetcher>, cache: Arc<dyn RosterCache>, dex: Arc<Dex>) -> Self {
        Self {
            fetcher,
            cache,
            dex,
        }
    }

    /// Drops the cached roster for `url` and resolves it again.
    ///
    /// The cache never expires on its own; this is the explicit
    /// re-resolution path for when the source document has changed.
    pub async fn refresh(&self, url: &str) -> anyhow::Result<Roster> {
        if self.cache.evict(url).await? {
            info!("Evicted cached roster for {url}");
        }
        self.team_roster(url).await
    }
}

#[async_trait]
impl RosterSource for RosterService {
    async fn team_roster(&self, url: &str) -> anyhow::Result<Roster> {
        if let Some(roster) = self.cache.lookup(url).await? {
            return Ok(roster);
        }

        let text = match self.fetcher.fetch_text(url).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Fetch failed for {url}: {e:#}");
                return Ok(Roster::fetch_error());
            }
        };

        let roster = self.dex.extract(&text);
        self.cache.store(url, &roster).await?;
        info!("Cached roster for {url}");
        Ok(roster)
    }
}
