//! The shared team library: query engine plus the write operations the
//! inbound commands map to.

use std::sync::Arc;

use tracing::info;

use crate::types::TeamRecord;
use crate::{RosterSource, TeamStore};

/// Front door for every command that touches team records.
///
/// The store is the sole writer of records; the roster source is consulted
/// for the membership-based operations. Both are only reached through
/// here.
pub struct Library {
    store: Arc<dyn TeamStore>,
    rosters: Arc<dyn RosterSource>,
}

impl Library {
    #[must_use]
    pub fn new(store: Arc<dyn TeamStore>, rosters: Arc<dyn RosterSource>) -> Self {
        Self { store, rosters }
    }

    pub async fn add_team(
        &self,
        generation: String,
        style: Option<String>,
        url: String,
    ) -> anyhow::Result<()> {
        info!("Adding team to {generation}: {url}");
        self.store
            .add(TeamRecord {
                generation,
                style,
                url,
            })
            .await
    }

    /// Returns `false` when no record matches `url`.
    pub async fn update_style(&self, url: &str, style: &str) -> anyhow::Result<bool> {
        self.store.update_style(url, style).await
    }

    /// Returns `false` when no record matches `url`.
    pub async fn delete_team(&self, url: &str) -> anyhow::Result<bool> {
        self.store.delete_by_url(url).await
    }

    /// Teams in `generation`, optionally narrowed by free-text filter terms.
    ///
    /// The joined filter is matched against style labels first; only when
    /// no style matches does it fall back to roster membership. Style wins
    /// even when rosters would also match, so a curator can reuse a
    /// species name as a style label without the label becoming
    /// unreachable.
    pub async fn query(
        &self,
        generation: &str,
        filter_terms: &[String],
    ) -> anyhow::Result<Vec<TeamRecord>> {
        let generation = generation.to_lowercase();
        let records: Vec<TeamRecord> = self
            .store
            .find_all()
            .await?
            .into_iter()
            .filter(|r| r.generation.to_lowercase() == generation)
            .collect();

        let filter = filter_terms.join(" ");
        let filter = filter.trim();
        if filter.is_empty() {
            return Ok(records);
        }

        let wanted = filter.to_lowercase();
        let by_style: Vec<TeamRecord> = records
            .iter()
            .filter(|r| r.style.as_deref().is_some_and(|s| s.to_lowercase() == wanted))
            .cloned()
            .collect();
        if !by_style.is_empty() {
            return Ok(by_style);
        }

        // Roster fallback: one sequential resolve per candidate. A fetch
        // failure yields a sentinel roster that matches nothing, so the
        // batch keeps going.
        let mut matched = Vec::new();
        for record in records {
            let roster = self.rosters.team_roster(&record.url).await?;
            if roster.contains(filter) {
                matched.push(record);
            }
        }
        Ok(matched)
    }

    /// Removes every team in `generation` whose roster contains `member`.
    /// Returns how many records were removed.
    pub async fn delete_banned(&self, generation: &str, member: &str) -> anyhow::Result<usize> {
        let generation = generation.to_lowercase();
        let mut removed = 0;
        for record in self.store.find_all().await? {
            if record.generation.to_lowercase() != generation {
                continue;
            }
            let roster = self.rosters.team_roster(&record.url).await?;
            if roster.contains(member) && self.store.delete_by_url(&record.url).await? {
                removed += 1;
            }
        }
        info!("Removed {removed} team(s) from {generation} containing {member}");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::*;
    use crate::types::Roster;

    struct MemoryStore {
        records: Mutex<Vec<TeamRecord>>,
    }

    impl MemoryStore {
        fn new(records: Vec<TeamRecord>) -> Self {
            Self {
                records: Mutex::new(records),
            }
        }
    }

    #[async_trait]
    impl TeamStore for MemoryStore {
        async fn add(&self, record: TeamRecord) -> anyhow::Result<()> {
            self.records.lock().await.push(record);
            Ok(())
        }

        async fn find_all(&self) -> anyhow::Result<Vec<TeamRecord>> {
            Ok(self.records.lock().await.clone())
        }

        async fn update_style(&self, url: &str, style: &str) -> anyhow::Result<bool> {
            let mut records = self.records.lock().await;
            let mut found = false;
            for record in records.iter_mut().filter(|r| r.url == url) {
                record.style = Some(style.to_string());
                found = true;
            }
            Ok(found)
        }

        async fn delete_by_url(&self, url: &str) -> anyhow::Result<bool> {
            let mut records = self.records.lock().await;
            let before = records.len();
            records.retain(|r| r.url != url);
            Ok(records.len() < before)
        }
    }

    /// Roster source backed by a fixed map; unknown URLs resolve to the
    /// fetch-error sentinel, like an unreachable paste.
    struct FixedRosters {
        by_url: HashMap<String, Roster>,
    }

    #[async_trait]
    impl RosterSource for FixedRosters {
        async fn team_roster(&self, url: &str) -> anyhow::Result<Roster> {
            Ok(self
                .by_url
                .get(url)
                .cloned()
                .unwrap_or_else(Roster::fetch_error))
        }
    }

    fn record(generation: &str, style: Option<&str>, url: &str) -> TeamRecord {
        TeamRecord {
            generation: generation.to_string(),
            style: style.map(ToString::to_string),
            url: url.to_string(),
        }
    }

    fn library(records: Vec<TeamRecord>, rosters: &[(&str, &[&str])]) -> Library {
        let by_url = rosters
            .iter()
            .map(|(url, names)| {
                let roster = Roster::from_names(names.iter().map(ToString::to_string));
                ((*url).to_string(), roster)
            })
            .collect();
        Library::new(
            Arc::new(MemoryStore::new(records)),
            Arc::new(FixedRosters { by_url }),
        )
    }

    #[tokio::test]
    async fn generation_match_is_exact_and_case_insensitive() -> anyhow::Result<()> {
        let library = library(
            vec![
                record("Gen9", None, "https://host/a"),
                record("gen9vgc", None, "https://host/b"),
                record("gen8", None, "https://host/c"),
            ],
            &[],
        );
        let result = library.query("GEN9", &[]).await?;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].url, "https://host/a");
        Ok(())
    }

    #[tokio::test]
    async fn no_filter_returns_whole_generation() -> anyhow::Result<()> {
        let library = library(
            vec![
                record("gen9", Some("rain"), "https://host/a"),
                record("gen9", None, "https://host/b"),
            ],
            &[],
        );
        assert_eq!(library.query("gen9", &[]).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn style_match_wins_over_roster_match() -> anyhow::Result<()> {
        // One team is *labeled* "Pikachu"; another *contains* Pikachu.
        let library = library(
            vec![
                record("gen9", Some("Pikachu"), "https://host/labeled"),
                record("gen9", Some("rain"), "https://host/contains"),
            ],
            &[("https://host/contains", &["Pikachu"] as &[&str])],
        );
        let result = library.query("gen9", &["pikachu".to_string()]).await?;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].url, "https://host/labeled");
        Ok(())
    }

    #[tokio::test]
    async fn roster_fallback_when_no_style_matches() -> anyhow::Result<()> {
        let library = library(
            vec![
                record("gen9", Some("rain"), "https://host/a"),
                record("gen9", None, "https://host/b"),
            ],
            &[
                ("https://host/a", &["Pelipper", "Barraskewda"] as &[&str]),
                ("https://host/b", &["Pikachu"] as &[&str]),
            ],
        );
        let result = library.query("gen9", &["Pikachu".to_string()]).await?;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].url, "https://host/b");
        Ok(())
    }

    #[tokio::test]
    async fn multi_word_filter_terms_are_joined() -> anyhow::Result<()> {
        let library = library(
            vec![record("gen9", None, "https://host/a")],
            &[("https://host/a", &["Iron Hands"] as &[&str])],
        );
        let terms = vec!["iron".to_string(), "hands".to_string()];
        assert_eq!(library.query("gen9", &terms).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn fetch_failure_drops_candidate_without_aborting() -> anyhow::Result<()> {
        // "https://host/dead" is not in the roster map and resolves to the
        // fetch-error sentinel.
        let library = library(
            vec![
                record("gen9", None, "https://host/dead"),
                record("gen9", None, "https://host/live"),
            ],
            &[("https://host/live", &["Pikachu"] as &[&str])],
        );
        let result = library.query("gen9", &["Pikachu".to_string()]).await?;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].url, "https://host/live");
        Ok(())
    }

    #[tokio::test]
    async fn delete_banned_counts_only_matching_records() -> anyhow::Result<()> {
        let library = library(
            vec![
                record("gen9", None, "https://host/a"),
                record("gen9", None, "https://host/b"),
                record("gen8", None, "https://host/c"),
                record("gen9", None, "https://host/dead"),
            ],
            &[
                ("https://host/a", &["Pikachu", "Charizard"] as &[&str]),
                ("https://host/b", &["Garchomp"] as &[&str]),
                ("https://host/c", &["Pikachu"] as &[&str]),
            ],
        );
        let removed = library.delete_banned("gen9", "pikachu").await?;
        assert_eq!(removed, 1);

        // gen8 team untouched, unreachable team untouched.
        assert_eq!(library.query("gen8", &[]).await?.len(), 1);
        assert_eq!(library.query("gen9", &[]).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_report_not_found() -> anyhow::Result<()> {
        let library = library(vec![record("gen9", None, "https://host/a")], &[]);
        assert!(library.update_style("https://host/a", "rain").await?);
        assert!(!library.update_style("https://host/missing", "rain").await?);
        assert!(library.delete_team("https://host/a").await?);
        assert!(!library.delete_team("https://host/a").await?);
        Ok(())
    }
}
