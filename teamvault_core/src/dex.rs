//! Species dictionary and roster extraction.
//!
//! The export page is rendered for humans and its markup is not a stable
//! contract, so extraction scans the flattened document text against a
//! closed dictionary of valid names instead of walking tags. The tradeoff
//! is a possible false association when a species name appears in
//! unrelated text, in exchange for robustness against markup drift.

use crate::types::{Roster, RosterSlot, TEAM_SIZE};

/// Case-fold text for matching: lowercase, with `-` and space treated as
/// interchangeable separators.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(|c| {
            let c = if c == '-' { ' ' } else { c };
            c.to_lowercase()
        })
        .collect()
}

#[derive(Debug, Clone)]
struct DexEntry {
    display: String,
    normalized: String,
}

/// Immutable dictionary of recognized species names.
///
/// Built once at startup and shared read-only from then on. Entries are
/// scanned longest-normalized-name-first with lexicographic tie-breaks, so
/// extraction does not depend on the order of the input file and
/// "Porygon-Z" beats "Porygon" at the same document position.
#[derive(Debug, Clone)]
pub struct Dex {
    entries: Vec<DexEntry>,
}

impl Dex {
    #[must_use]
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut entries: Vec<DexEntry> = names
            .into_iter()
            .filter(|n| !n.trim().is_empty())
            .map(|display| {
                let normalized = normalize(&display);
                DexEntry {
                    display,
                    normalized,
                }
            })
            .collect();
        entries.sort_by(|a, b| {
            b.normalized
                .len()
                .cmp(&a.normalized.len())
                .then_with(|| a.normalized.cmp(&b.normalized))
        });
        entries.dedup_by(|a, b| a.normalized == b.normalized);
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Extract up to six recognized names from a flattened document.
    ///
    /// Every dictionary entry claims its word-boundary occurrences in the
    /// normalized text; a position claimed once is not claimable again, and
    /// the scan stops after [`TEAM_SIZE`] claims. Claimed names are then
    /// emitted in document-position order, which is what encodes "team
    /// order" without relying on layout markers.
    #[must_use]
    pub fn extract(&self, document: &str) -> Roster {
        let text = normalize(document);
        let mut found: Vec<(usize, &str)> = Vec::with_capacity(TEAM_SIZE);

        'scan: for entry in &self.entries {
            for pos in word_occurrences(&text, &entry.normalized) {
                if found.iter().any(|&(p, _)| p == pos) {
                    continue;
                }
                found.push((pos, entry.display.as_str()));
                if found.len() == TEAM_SIZE {
                    break 'scan;
                }
            }
        }

        found.sort_unstable_by_key(|&(pos, _)| pos);
        Roster::from_names(found.into_iter().map(|(_, name)| name.to_string()))
    }
}

/// Byte offsets of the word-boundary occurrences of `needle` in `text`.
/// A boundary is the text edge or a non-alphanumeric neighbor.
fn word_occurrences(text: &str, needle: &str) -> Vec<usize> {
    let mut out = Vec::new();
    for (pos, matched) in text.match_indices(needle) {
        let before_ok = text[..pos]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = text[pos + matched.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            out.push(pos);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dex(names: &[&str]) -> Dex {
        Dex::new(names.iter().map(ToString::to_string))
    }

    #[test]
    fn extracts_in_document_order() {
        let dex = dex(&["Pikachu", "Charizard"]);
        let roster = dex.extract("... Charizard @ Life Orb ... Pikachu @ Light Ball ...");
        assert_eq!(
            roster,
            Roster::from_names([
                "Charizard".to_string(),
                "Pikachu".to_string(),
            ])
        );
    }

    #[test]
    fn always_six_slots() {
        let dex = dex(&["Pikachu"]);
        let roster = dex.extract("nothing recognizable here");
        assert_eq!(roster.slots().len(), TEAM_SIZE);
        assert!(roster.slots().iter().all(|s| *s == RosterSlot::NotFound));
    }

    #[test]
    fn word_boundaries_reject_embedded_names() {
        let dex = dex(&["Mew"]);
        let roster = dex.extract("Mewtwo @ Leftovers");
        assert_eq!(roster.slots()[0], RosterSlot::NotFound);

        let roster = dex.extract("Mew @ Leftovers");
        assert_eq!(roster.slots()[0], RosterSlot::Name("Mew".to_string()));
    }

    #[test]
    fn hyphen_and_space_are_interchangeable() {
        let dex = dex(&["Ho-Oh", "Tapu Koko"]);
        let roster = dex.extract("ho oh @ Sacred Ash\ntapu-koko @ Choice Specs");
        assert_eq!(roster.slots()[0], RosterSlot::Name("Ho-Oh".to_string()));
        assert_eq!(roster.slots()[1], RosterSlot::Name("Tapu Koko".to_string()));
    }

    #[test]
    fn longest_name_wins_same_position() {
        let dex = dex(&["Porygon", "Porygon-Z"]);
        let roster = dex.extract("Porygon-Z @ Choice Scarf");
        assert_eq!(roster.slots()[0], RosterSlot::Name("Porygon-Z".to_string()));
        assert_eq!(roster.slots()[1], RosterSlot::NotFound);
    }

    #[test]
    fn matching_is_case_insensitive_and_recased() {
        let dex = dex(&["Charizard"]);
        let roster = dex.extract("CHARIZARD @ Heavy-Duty Boots");
        assert_eq!(roster.slots()[0], RosterSlot::Name("Charizard".to_string()));
    }

    #[test]
    fn repeated_name_claims_distinct_positions() {
        let dex = dex(&["Pikachu"]);
        let roster = dex.extract("Pikachu ... Pikachu ... Pikachu");
        let named = roster
            .slots()
            .iter()
            .filter(|s| matches!(s, RosterSlot::Name(_)))
            .count();
        assert_eq!(named, 3);
    }

    #[test]
    fn stops_after_six_claims() {
        let dex = dex(&["Pikachu"]);
        let doc = "Pikachu ".repeat(10);
        let roster = dex.extract(&doc);
        assert!(roster.is_complete());
    }

    #[test]
    fn duplicate_dictionary_entries_collapse() {
        let dex = dex(&["Pikachu", "pikachu", "PIKACHU"]);
        assert_eq!(dex.len(), 1);
    }
}
