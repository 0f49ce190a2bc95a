//! Derived item lists for the discover and category tabs.
//!
//! A [`Feed`] is the payload handed to a "See All" callback: a title plus an
//! ordered list of items borrowed from the catalog.

use std::cmp::Ordering;

use super::item::{CatalogItem, Category};

/// Title of the rating-ordered discover feed.
pub const NEW_FEED_TITLE: &str = "New Games";

/// Title of the download-ordered discover feed.
pub const TRENDING_FEED_TITLE: &str = "Trending Now";

/// A titled, ordered list of catalog items.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed<'a> {
    pub title: String,
    pub items: Vec<&'a CatalogItem>,
}

impl<'a> Feed<'a> {
    #[must_use]
    pub fn new(title: impl Into<String>, items: Vec<&'a CatalogItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Returns the first featured item, if any.
#[must_use]
pub fn featured_item(items: &[CatalogItem]) -> Option<&CatalogItem> {
    items.iter().find(|item| item.featured)
}

/// Non-featured items ordered by rating, then unscaled download count.
#[must_use]
pub fn new_feed(items: &[CatalogItem]) -> Feed<'_> {
    let mut list: Vec<&CatalogItem> = items.iter().filter(|item| !item.featured).collect();
    list.sort_by(|a, b| {
        desc(a.rating, b.rating).then_with(|| desc(a.download_count(), b.download_count()))
    });
    Feed::new(NEW_FEED_TITLE, list)
}

/// Non-featured items ordered by unscaled download count, then rating.
#[must_use]
pub fn trending_feed(items: &[CatalogItem]) -> Feed<'_> {
    let mut list: Vec<&CatalogItem> = items.iter().filter(|item| !item.featured).collect();
    list.sort_by(|a, b| {
        desc(a.download_count(), b.download_count()).then_with(|| desc(a.rating, b.rating))
    });
    Feed::new(TRENDING_FEED_TITLE, list)
}

/// All items of one category, in catalog order.
#[must_use]
pub fn category_feed(items: &[CatalogItem], category: Category) -> Feed<'_> {
    let title = match category {
        Category::Game => "Games",
        Category::App => "Apps",
    };
    Feed::new(
        title,
        items
            .iter()
            .filter(|item| item.category == category)
            .collect(),
    )
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
