//! Relevance signals and their weights.

use crate::catalog::CatalogItem;

/// One independently evaluated match signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    /// Query is a substring of the title.
    TitleContains,
    /// Title starts with the query; stacks on top of [`Signal::TitleContains`].
    TitlePrefix,
    /// Query is a substring of at least one tag.
    TagContains,
    /// Query is a substring of the category label.
    CategoryContains,
    /// Query is a substring of the description.
    DescriptionContains,
    /// Item carries the featured flag.
    Featured,
}

impl Signal {
    /// All signals, strongest first.
    pub const ALL: [Self; 6] = [
        Self::TitleContains,
        Self::TitlePrefix,
        Self::TagContains,
        Self::CategoryContains,
        Self::DescriptionContains,
        Self::Featured,
    ];

    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::TitleContains => 10,
            Self::TitlePrefix => 5,
            Self::TagContains => 3,
            Self::CategoryContains => 2,
            Self::DescriptionContains | Self::Featured => 1,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TitleContains => "title",
            Self::TitlePrefix => "title_prefix",
            Self::TagContains => "tag",
            Self::CategoryContains => "category",
            Self::DescriptionContains => "description",
            Self::Featured => "featured",
        }
    }

    fn matches(self, item: &CatalogItem, query_lower: &str) -> bool {
        match self {
            Self::TitleContains => item.title.to_lowercase().contains(query_lower),
            Self::TitlePrefix => item.title.to_lowercase().starts_with(query_lower),
            Self::TagContains => item
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(query_lower)),
            Self::CategoryContains => item.category.as_str().contains(query_lower),
            Self::DescriptionContains => item.description.to_lowercase().contains(query_lower),
            Self::Featured => item.featured,
        }
    }
}

/// Weighted score of one item against one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelevanceScore {
    pub total: u32,
    /// Signals that fired, strongest first.
    pub signals: Vec<Signal>,
}

impl RelevanceScore {
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.total > 0
    }
}

/// Scores `item` against an already lowercased query.
#[must_use]
pub fn score_normalized(item: &CatalogItem, query_lower: &str) -> RelevanceScore {
    let signals: Vec<Signal> = Signal::ALL
        .into_iter()
        .filter(|signal| signal.matches(item, query_lower))
        .collect();
    let total = signals.iter().map(|signal| signal.weight()).sum();
    RelevanceScore { total, signals }
}

/// Scores `item` against a raw user query.
///
/// An empty (after trimming) query scores zero for every item, featured or not.
#[must_use]
pub fn score_item(item: &CatalogItem, query: &str) -> RelevanceScore {
    normalize_query(query).map_or_else(RelevanceScore::default, |query_lower| {
        score_normalized(item, &query_lower)
    })
}

/// Lowercases `query` for matching, or `None` when it is blank.
///
/// Surrounding whitespace only decides blankness; it stays part of the
/// matched text, so `"zeta "` does not match a title ending in `"Zeta"`.
#[must_use]
pub fn normalize_query(query: &str) -> Option<String> {
    (!query.trim().is_empty()).then(|| query.to_lowercase())
}
