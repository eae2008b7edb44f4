//! Species dictionary file loading.
//!
//! The dictionary is read once at startup and turned into an immutable
//! [`teamvault_core::Dex`]; nothing re-reads it while the bot runs.

use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
struct SpeciesFile {
    species: Vec<String>,
}

/// Load the species name list from a JSON file of the form
/// `{"species": ["Pikachu", ...]}`.
pub fn load_species(path: &Path) -> anyhow::Result<Vec<String>> {
    if !path.exists() {
        anyhow::bail!(
            "Species dictionary not found at: {}. Create it as {{\"species\": [\"Pikachu\", ...]}}.",
            path.display()
        );
    }

    let content = std::fs::read_to_string(path)?;
    let file: SpeciesFile = serde_json::from_str(&content)?;

    if file.species.is_empty() {
        anyhow::bail!("Species dictionary at {} is empty", path.display());
    }

    info!("Loaded {} species names from {}", file.species.len(), path.display());
    Ok(file.species)
}
