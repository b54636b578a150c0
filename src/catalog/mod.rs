//! Wearable catalog
//!
//! A catalog is the set of wearables a content pack offers, kept in the key
//! order of the source document so menu layout is deterministic.

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

pub mod descriptor;
pub mod loader;

pub use descriptor::WearableDescriptor;
pub use loader::{load_catalog, CatalogSource, CatalogState, HttpCatalogSource};

/// Errors that can occur while obtaining a catalog
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP status error: {0}")]
    Status(u16),

    #[error("Catalog request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Catalog document is not a JSON object")]
    NotAnObject,

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Serializes back to the `id -> descriptor` document shape
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: IndexMap<String, WearableDescriptor>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(body: &str) -> Result<Self, CatalogError> {
        let value: serde_json::Value =
            serde_json::from_str(body).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::from_value(value)
    }

    /// Build from a top-level JSON object of `id -> descriptor`.
    ///
    /// Entries that do not deserialize as a descriptor are skipped with a
    /// warning; the rest of the pack stays usable.
    pub fn from_value(value: serde_json::Value) -> Result<Self, CatalogError> {
        let serde_json::Value::Object(map) = value else {
            return Err(CatalogError::NotAnObject);
        };

        let mut catalog = Catalog::new();
        for (id, entry) in map {
            match serde_json::from_value::<WearableDescriptor>(entry) {
                Ok(descriptor) => catalog.insert(id, descriptor),
                Err(e) => warn!("Skipping catalog entry '{}': {}", id, e),
            }
        }
        Ok(catalog)
    }

    /// Insert or replace an entry. A replaced entry keeps its position.
    pub fn insert(&mut self, id: impl Into<String>, descriptor: WearableDescriptor) {
        self.entries.insert(id.into(), descriptor);
    }

    pub fn get(&self, id: &str) -> Option<&WearableDescriptor> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &WearableDescriptor)> {
        self.entries.iter().map(|(id, d)| (id.as_str(), d))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, WearableDescriptor)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, WearableDescriptor)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
