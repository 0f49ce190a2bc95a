//! Catalog item and category definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::magnitude::parse_download_count;

/// Which storefront tab an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Listed under the games tab.
    Game,
    /// Listed under the apps tab.
    App,
}

impl Category {
    /// Returns the lowercase label, which is also what search matches against.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Game => "game",
            Self::App => "app",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One listed game or app.
///
/// Items are supplied by the catalog provider and never mutated by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Unique, stable identifier.
    pub id: String,
    /// Display title; the strongest search target.
    pub title: String,
    /// Long-form description.
    pub description: String,
    /// Icon locator (display only).
    #[serde(default)]
    pub icon: String,
    /// Banner locator (display only).
    #[serde(default)]
    pub banner_image: String,
    /// Human-readable package size, e.g. `"150 MB"` (display only).
    #[serde(default)]
    pub size: String,
    /// Average rating, used as the search tie-break.
    pub rating: f64,
    /// Human-readable download magnitude, e.g. `"1.2M"`.
    pub downloads: String,
    /// Category labels such as `"MOD"` or `"PREMIUM"`.
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Category,
    /// At most one item per catalog is expected to carry this flag.
    #[serde(default)]
    pub featured: bool,
    /// Opaque locator passed untouched to the hand-off step.
    pub download_url: String,
}

impl CatalogItem {
    /// Numeric download signal with unit suffixes ignored (`"1.2M"` → `1.2`).
    ///
    /// Unparseable magnitudes rank as zero.
    #[must_use]
    pub fn download_count(&self) -> f64 {
        parse_download_count(&self.downloads).unwrap_or(0.0)
    }

    /// First `n` tags, as shown on cards and search rows.
    #[must_use]
    pub fn display_tags(&self, n: usize) -> &[String] {
        &self.tags[..self.tags.len().min(n)]
    }
}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CatalogItem {{ id: {}, title: {}, category: {} }}",
            self.id, self.title, self.category
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "id": "g1",
            "title": "Zeta Racer",
            "description": "Fast cars",
            "rating": 4.5,
            "downloads": "1.2M",
            "tags": ["MOD", "PREMIUM", "UNLOCKED"],
            "category": "game",
            "downloadUrl": "https://example.com/zeta"
        }"#
    }

    #[test]
    fn test_category_as_str_and_display() {
        assert_eq!(Category::Game.as_str(), "game");
        assert_eq!(Category::App.to_string(), "app");
    }

    #[test]
    fn test_item_deserializes_camel_case_with_defaults() {
        let item: CatalogItem = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(item.id, "g1");
        assert_eq!(item.download_url, "https://example.com/zeta");
        assert_eq!(item.category, Category::Game);
        assert!(!item.featured, "featured defaults to false when absent");
        assert!(item.icon.is_empty());
    }

    #[test]
    fn test_download_count_ignores_suffix() {
        let item: CatalogItem = serde_json::from_str(sample_json()).unwrap();
        assert!((item.download_count() - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display_tags_caps_at_available() {
        let item: CatalogItem = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(item.display_tags(2), ["MOD", "PREMIUM"]);
        assert_eq!(item.display_tags(10).len(), 3);
    }
}
