//! In-memory star catalogue.

#[cfg(feature = "catalog-download")]
pub mod download;
pub mod hipparcos;

use crate::engine::NAKED_EYE_MAGNITUDE_LIMIT;
use crate::models::StarCatalogEntry;

/// Immutable star catalogue, shared between requests through an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct StarCatalog {
    entries: Vec<StarCatalogEntry>,
}

impl StarCatalog {
    pub fn new(entries: Vec<StarCatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[StarCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries brighter than the naked-eye limit, in catalogue order.
    pub fn naked_eye(&self) -> impl Iterator<Item = &StarCatalogEntry> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.magnitude < NAKED_EYE_MAGNITUDE_LIMIT)
    }
}

impl FromIterator<StarCatalogEntry> for StarCatalog {
    fn from_iter<I: IntoIterator<Item = StarCatalogEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
