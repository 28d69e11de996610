//! Material search and status filtering for the registry listing.

use serde::{Deserialize, Serialize};

use stockroom_inventory::{Material, StockStatus};

/// Filter criteria for the material listing.
///
/// An empty search text matches everything; `status: None` means "all
/// statuses".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialFilter {
    /// Case-insensitive substring matched against name or description.
    pub search: String,
    pub status: Option<StockStatus>,
}

impl MaterialFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_status(mut self, status: StockStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, material: &Material) -> bool {
        let needle = self.search.trim().to_lowercase();
        let text_matches = needle.is_empty()
            || material.name().to_lowercase().contains(&needle)
            || material.description().to_lowercase().contains(&needle);

        text_matches && self.status.is_none_or(|s| material.status() == s)
    }

    /// Matching materials, registry order preserved.
    pub fn apply<'a>(&self, materials: &'a [Material]) -> Vec<&'a Material> {
        materials.iter().filter(|m| self.matches(m)).collect()
    }
}
