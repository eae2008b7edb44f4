use serde::{Deserialize, Serialize};

use crate::dex::normalize;

/// Slots in a standard team.
pub const TEAM_SIZE: usize = 6;

/// A curated team entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    /// Coarse category key teams are grouped by (e.g. "gen9").
    pub generation: String,
    /// Free-text label attached by curators. Absent until someone sets it.
    pub style: Option<String>,
    /// Link to the externally hosted team-export page.
    pub url: String,
}

/// One slot of an extracted roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterSlot {
    /// A recognized species name, in canonical display casing.
    Name(String),
    /// The document was reachable but this slot held no recognized name.
    NotFound,
    /// The document could not be fetched. Retryable; never persisted.
    FetchError,
}

/// Ordered list of six roster slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster(pub [RosterSlot; TEAM_SIZE]);

impl Roster {
    /// Roster built from recognized names in document order, padded with
    /// [`RosterSlot::NotFound`].
    #[must_use]
    pub fn from_names<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut names = names.into_iter();
        Self(std::array::from_fn(|_| {
            names.next().map_or(RosterSlot::NotFound, RosterSlot::Name)
        }))
    }

    /// The sentinel roster a failed fetch resolves to.
    #[must_use]
    pub fn fetch_error() -> Self {
        Self(std::array::from_fn(|_| RosterSlot::FetchError))
    }

    #[must_use]
    pub const fn slots(&self) -> &[RosterSlot; TEAM_SIZE] {
        &self.0
    }

    /// True when every slot holds a recognized name.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(|s| matches!(s, RosterSlot::Name(_)))
    }

    /// True when this is the fetch-failure sentinel.
    #[must_use]
    pub fn is_fetch_error(&self) -> bool {
        self.0.iter().any(|s| matches!(s, RosterSlot::FetchError))
    }

    /// The recognized names in order, sentinel slots skipped.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter_map(|s| match s {
                RosterSlot::Name(name) => Some(name.as_str()),
                RosterSlot::NotFound | RosterSlot::FetchError => None,
            })
            .collect()
    }

    /// Case-insensitive, separator-normalized membership test. Sentinel
    /// slots never match.
    #[must_use]
    pub fn contains(&self, member: &str) -> bool {
        let wanted = normalize(member);
        self.0.iter().any(|s| match s {
            RosterSlot::Name(name) => normalize(name) == wanted,
            RosterSlot::NotFound | RosterSlot::FetchError => false,
        })
    }
}
