//! Catalog data provider.
//!
//! The catalog is an ordered, immutable collection of [`CatalogItem`]s loaded
//! from a JSON array. Search and the session registry only ever borrow from
//! it.
//!
//! # Example
//!
//! ```
//! use storefront_core::catalog::Catalog;
//!
//! let catalog = Catalog::builtin()?;
//! assert!(catalog.featured().is_some());
//! # Ok::<(), storefront_core::catalog::CatalogError>(())
//! ```

mod error;
mod feeds;
mod item;
mod magnitude;

pub use error::CatalogError;
pub use feeds::{
    Feed, NEW_FEED_TITLE, TRENDING_FEED_TITLE, category_feed, featured_item, new_feed,
    trending_feed,
};
pub use item::{CatalogItem, Category};
pub use magnitude::parse_download_count;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{debug, instrument, warn};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Ordered collection of catalog items with unique ids.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Builds a catalog from already-deserialized items, validating ids.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyId`] or [`CatalogError::DuplicateId`].
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        validate_items(&items)?;
        debug!(items = items.len(), "catalog loaded");
        Ok(Self { items })
    }

    /// Parses a catalog from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed JSON, or a validation error.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let items: Vec<CatalogItem> = serde_json::from_str(raw)?;
        Self::new(items)
    }

    /// Loads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, or any error
    /// from [`Catalog::from_json_str`].
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::io(path, source))?;
        Self::from_json_str(&raw)
    }

    /// The sample catalog bundled with the binary.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled document is itself invalid.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn featured(&self) -> Option<&CatalogItem> {
        featured_item(&self.items)
    }
}

fn validate_items(items: &[CatalogItem]) -> Result<(), CatalogError> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        if item.id.trim().is_empty() {
            return Err(CatalogError::EmptyId { position });
        }
        if let Some(first) = seen.insert(item.id.as_str(), position) {
            return Err(CatalogError::DuplicateId {
                id: item.id.clone(),
                first,
                second: position,
            });
        }
        if url::Url::parse(&item.download_url).is_err() {
            // Locators are opaque; only flag what a launcher may refuse.
            warn!(id = %item.id, url = %item.download_url, "download locator is not an absolute URL");
        }
    }

    let featured = items.iter().filter(|item| item.featured).count();
    if featured > 1 {
        warn!(featured, "catalog has more than one featured item");
    }
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_item(
    id: &str,
    title: &str,
    category: Category,
    rating: f64,
    downloads: &str,
) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        icon: String::new(),
        banner_image: String::new(),
        size: String::new(),
        rating,
        downloads: downloads.to_string(),
        tags: Vec::new(),
        category,
        featured: false,
        download_url: format!("https://example.com/{id}"),
    }
}
