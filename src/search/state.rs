//! Caller-held search state: the latest query and its outcome.

use tracing::debug;

use super::{SearchOutcome, search};
use crate::catalog::CatalogItem;

/// How the overlay visibility changed after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTransition {
    /// Blank → non-blank: show the results overlay.
    Activated,
    /// Non-blank → blank (or cleared): hide the overlay.
    Deactivated,
    /// Still active, results recomputed.
    Refreshed,
    /// Still inactive.
    Unchanged,
}

/// Last query/outcome pair for one search box.
#[derive(Debug, Clone)]
pub struct SearchState<'a> {
    catalog: &'a [CatalogItem],
    query: String,
    outcome: SearchOutcome<'a>,
}

impl<'a> SearchState<'a> {
    #[must_use]
    pub fn new(catalog: &'a [CatalogItem]) -> Self {
        Self {
            catalog,
            query: String::new(),
            outcome: SearchOutcome::Inactive,
        }
    }

    /// Replaces the query and re-runs the search.
    pub fn update(&mut self, query: &str) -> SearchTransition {
        let was_active = self.outcome.is_active();
        query.clone_into(&mut self.query);
        self.outcome = search(self.catalog, query);

        let transition = match (was_active, self.outcome.is_active()) {
            (false, true) => SearchTransition::Activated,
            (true, false) => SearchTransition::Deactivated,
            (true, true) => SearchTransition::Refreshed,
            (false, false) => SearchTransition::Unchanged,
        };
        debug!(?transition, results = self.outcome.len(), "search updated");
        transition
    }

    /// Clears the query, as after a result is selected.
    pub fn clear(&mut self) -> SearchTransition {
        self.update("")
    }

    /// Returns the selected result and clears the search, mirroring a row click.
    pub fn select(&mut self, index: usize) -> Option<&'a CatalogItem> {
        let item = self.outcome.results().get(index).copied();
        if item.is_some() {
            self.clear();
        }
        item
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn outcome(&self) -> &SearchOutcome<'a> {
        &self.outcome
    }
}
