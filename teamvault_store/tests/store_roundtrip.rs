//! Round-trip tests for the SQLite store, against an in-memory database.

use teamvault_core::{Roster, RosterCache, RosterSlot, TeamRecord, TeamStore};
use teamvault_store::StoreManager;

fn record(generation: &str, style: Option<&str>, url: &str) -> TeamRecord {
    TeamRecord {
        generation: generation.to_string(),
        style: style.map(ToString::to_string),
        url: url.to_string(),
    }
}

#[tokio::test]
async fn add_then_find_preserves_insertion_order() -> anyhow::Result<()> {
    let store = StoreManager::open_in_memory().await?;

    store.add(record("gen9", Some("rain"), "https://host/a")).await?;
    store.add(record("gen9", None, "https://host/b")).await?;
    store.add(record("gen8", None, "https://host/c")).await?;

    let all = store.find_all().await?;
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].url, "https://host/a");
    assert_eq!(all[0].style.as_deref(), Some("rain"));
    assert_eq!(all[1].style, None);
    assert_eq!(all[2].generation, "gen8");
    Ok(())
}

#[tokio::test]
async fn update_style_reports_found() -> anyhow::Result<()> {
    let store = StoreManager::open_in_memory().await?;
    store.add(record("gen9", None, "https://host/a")).await?;

    assert!(store.update_style("https://host/a", "sun").await?);
    assert!(!store.update_style("https://host/missing", "sun").await?);

    let all = store.find_all().await?;
    assert_eq!(all[0].style.as_deref(), Some("sun"));
    Ok(())
}

#[tokio::test]
async fn delete_then_delete_again_reports_not_found() -> anyhow::Result<()> {
    let store = StoreManager::open_in_memory().await?;
    store.add(record("gen9", None, "https://host/abc")).await?;

    assert!(store.delete_by_url("https://host/abc").await?);
    assert!(store.find_all().await?.is_empty());
    assert!(!store.delete_by_url("https://host/abc").await?);
    Ok(())
}

#[tokio::test]
async fn duplicate_urls_are_permitted_and_deleted_together() -> anyhow::Result<()> {
    let store = StoreManager::open_in_memory().await?;
    store.add(record("gen9", None, "https://host/dup")).await?;
    store.add(record("gen9", Some("hail"), "https://host/dup")).await?;

    assert_eq!(store.find_all().await?.len(), 2);
    assert!(store.delete_by_url("https://host/dup").await?);
    assert!(store.find_all().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn roster_cache_upsert_overwrites_by_url() -> anyhow::Result<()> {
    let store = StoreManager::open_in_memory().await?;
    let url = "https://host/abc";

    assert_eq!(store.lookup(url).await?, None);

    let partial = Roster::from_names(["Pikachu".to_string()]);
    store.store(url, &partial).await?;
    assert_eq!(store.lookup(url).await?, Some(partial));

    let full = Roster::from_names([
        "Pelipper".to_string(),
        "Barraskewda".to_string(),
        "Ferrothorn".to_string(),
        "Archaludon".to_string(),
        "Iron Hands".to_string(),
        "Amoonguss".to_string(),
    ]);
    store.store(url, &full).await?;
    assert_eq!(store.lookup(url).await?, Some(full));
    Ok(())
}

#[tokio::test]
async fn evict_reports_presence() -> anyhow::Result<()> {
    let store = StoreManager::open_in_memory().await?;
    let url = "https://host/abc";

    assert!(!store.evict(url).await?);
    store
        .store(url, &Roster::from_names(["Pikachu".to_string()]))
        .await?;
    assert!(store.evict(url).await?);
    assert_eq!(store.lookup(url).await?, None);
    Ok(())
}

#[tokio::test]
async fn cached_sentinel_slots_round_trip() -> anyhow::Result<()> {
    let store = StoreManager::open_in_memory().await?;
    let url = "https://host/abc";

    let roster = Roster::from_names(["Pikachu".to_string()]);
    store.store(url, &roster).await?;

    let Some(loaded) = store.lookup(url).await? else {
        panic!("expected cached roster");
    };
    assert_eq!(loaded.slots()[0], RosterSlot::Name("Pikachu".to_string()));
    assert_eq!(loaded.slots()[5], RosterSlot::NotFound);
    Ok(())
}
