//! Relevance-ranked catalog search.
//!
//! [`search`] is a pure function of `(catalog, query)`: it is cheap enough to
//! call on every keystroke and keeps no state of its own. Callers that need to
//! remember the last query use [`SearchState`].
//!
//! # Ranking
//!
//! Each item is scored by the signals in [`Signal`]; zero-score items are
//! dropped, the rest are ordered by score, then rating, then catalog position,
//! and the list is capped at [`MAX_SEARCH_RESULTS`].
//!
//! # Example
//!
//! ```
//! use storefront_core::catalog::Catalog;
//! use storefront_core::search::{SearchOutcome, search};
//!
//! let catalog = Catalog::builtin()?;
//! assert_eq!(search(catalog.items(), "  "), SearchOutcome::Inactive);
//! assert!(search(catalog.items(), "premium").is_active());
//! # Ok::<(), storefront_core::catalog::CatalogError>(())
//! ```

mod score;
mod state;

pub use score::{RelevanceScore, Signal, normalize_query, score_item};
pub use state::{SearchState, SearchTransition};

use std::cmp::Ordering;

use tracing::trace;

use crate::catalog::CatalogItem;

/// Maximum number of items a search returns.
pub const MAX_SEARCH_RESULTS: usize = 6;

/// Result of a search call.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// Blank query: no overlay should be shown.
    Inactive,
    /// Non-blank query; may hold zero results ("no matches").
    Active(Vec<&'a CatalogItem>),
}

impl<'a> SearchOutcome<'a> {
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Ranked results; empty when inactive.
    #[must_use]
    pub fn results(&self) -> &[&'a CatalogItem] {
        match self {
            Self::Inactive => &[],
            Self::Active(items) => items,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results().is_empty()
    }
}

/// Ranks `catalog` against `query`.
#[must_use]
pub fn search<'a>(catalog: &'a [CatalogItem], query: &str) -> SearchOutcome<'a> {
    let Some(query_lower) = normalize_query(query) else {
        return SearchOutcome::Inactive;
    };

    let mut scored: Vec<(usize, u32, &CatalogItem)> = catalog
        .iter()
        .enumerate()
        .filter_map(|(position, item)| {
            let score = score::score_normalized(item, &query_lower);
            score.is_match().then_some((position, score.total, item))
        })
        .collect();

    scored.sort_by(|left, right| {
        right
            .1
            .cmp(&left.1)
            .then_with(|| {
                right
                    .2
                    .rating
                    .partial_cmp(&left.2.rating)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| left.0.cmp(&right.0))
    });

    trace!(query = %query_lower, matched = scored.len(), "search ranked");

    SearchOutcome::Active(
        scored
            .into_iter()
            .take(MAX_SEARCH_RESULTS)
            .map(|(_, _, item)| item)
            .collect(),
    )
}
