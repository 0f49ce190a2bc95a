//! Integration tests for catalog search and discover feeds.
//!
//! These tests exercise the public API against the bundled catalog and
//! small hand-built catalogs.

use storefront_core::catalog::{new_feed, trending_feed};
use storefront_core::search::score_item;
use storefront_core::{
    Catalog, CatalogItem, Category, MAX_SEARCH_RESULTS, SearchState, SearchTransition,
    parse_download_count, search,
};

fn item(id: &str, title: &str, tags: &[&str], rating: f64) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        icon: String::new(),
        banner_image: String::new(),
        size: "50 MB".to_string(),
        rating,
        downloads: "1M".to_string(),
        tags: tags.iter().map(ToString::to_string).collect(),
        category: Category::Game,
        featured: false,
        download_url: format!("https://downloads.example.com/{id}"),
    }
}

fn ids(items: &[&CatalogItem]) -> Vec<String> {
    items.iter().map(|item| item.id.clone()).collect()
}

// ==================== Search ====================

#[test]
fn test_empty_query_is_inactive_for_any_catalog() {
    let catalog = Catalog::builtin().unwrap();
    for query in ["", "   ", "\t"] {
        let outcome = search(catalog.items(), query);
        assert!(!outcome.is_active(), "query {query:?} should be inactive");
        assert!(outcome.is_empty());
    }
    assert!(!search(&[], "").is_active());
}

#[test]
fn test_results_never_exceed_limit_and_never_score_zero() {
    let catalog = Catalog::builtin().unwrap();
    for query in ["a", "e", "mod", "game", "app", "premium", "zzzz", "minecraft"] {
        let outcome = search(catalog.items(), query);
        assert!(outcome.len() <= MAX_SEARCH_RESULTS, "query {query:?}");
        for result in outcome.results() {
            assert!(
                score_item(result, query).total > 0,
                "{} returned for {query:?} with zero score",
                result.id
            );
        }
    }
}

#[test]
fn test_results_sorted_by_score_then_rating() {
    let catalog = Catalog::builtin().unwrap();
    let query = "mod";
    let outcome = search(catalog.items(), query);
    let scored: Vec<(u32, f64)> = outcome
        .results()
        .iter()
        .map(|item| (score_item(item, query).total, item.rating))
        .collect();
    for pair in scored.windows(2) {
        let (score_a, rating_a) = pair[0];
        let (score_b, rating_b) = pair[1];
        assert!(score_a > score_b || (score_a == score_b && rating_a >= rating_b));
    }
}

#[test]
fn test_rating_breaks_equal_title_scores() {
    let items = vec![
        item("a", "The Zeta", &["x"], 4.0),
        item("b", "Alpha Zeta", &[], 4.9),
    ];
    let outcome = search(&items, "zeta");
    assert_eq!(ids(outcome.results()), vec!["b", "a"]);
}

#[test]
fn test_prefix_outranks_higher_rated_contains() {
    let items = vec![
        item("a", "Zeta", &["x"], 4.0),
        item("b", "Alpha Zeta", &[], 4.9),
    ];
    let outcome = search(&items, "zeta");
    assert_eq!(ids(outcome.results()), vec!["a", "b"]);
    assert_eq!(score_item(&items[0], "zeta").total, 15);
    assert_eq!(score_item(&items[1], "zeta").total, 10);
}

#[test]
fn test_tag_only_match_scores_three_and_is_included() {
    let items = vec![item("p", "Notes", &["PREMIUM"], 4.0)];
    assert_eq!(score_item(&items[0], "premium").total, 3);
    assert_eq!(ids(search(&items, "premium").results()), vec!["p"]);
}

#[test]
fn test_equal_score_and_rating_keep_catalog_order() {
    let items = vec![
        item("first", "Racer One", &[], 4.5),
        item("second", "Racer Two", &[], 4.5),
        item("third", "Racer Three", &[], 4.5),
    ];
    let outcome = search(&items, "racer");
    assert_eq!(ids(outcome.results()), vec!["first", "second", "third"]);
}

#[test]
fn test_query_is_case_insensitive_but_not_trimmed() {
    let catalog = Catalog::builtin().unwrap();
    let lower = ids(search(catalog.items(), "spotify").results());
    let shouted = ids(search(catalog.items(), "SPOTIFY").results());
    assert_eq!(lower, shouted);
    assert_eq!(lower.first().map(String::as_str), Some("spotify-premium"));

    // "Spotify Premium" contains "spotify "; "Subway Surfers" has nothing after "surfers".
    let spaced = ids(search(catalog.items(), "spotify ").results());
    assert_eq!(spaced.first().map(String::as_str), Some("spotify-premium"));
    let trailing = ids(search(catalog.items(), "surfers ").results());
    assert!(!trailing.contains(&"subway-surfers".to_string()));
}

#[test]
fn test_search_state_tracks_activation() {
    let catalog = Catalog::builtin().unwrap();
    let mut state = SearchState::new(catalog.items());

    assert_eq!(state.update("sub"), SearchTransition::Activated);
    assert_eq!(state.update("subway"), SearchTransition::Refreshed);
    let picked = state.select(0).map(|item| item.id.clone());
    assert_eq!(picked.as_deref(), Some("subway-surfers"));
    assert!(!state.outcome().is_active());
    assert_eq!(state.query(), "");
}

// ==================== Magnitudes and feeds ====================

#[test]
fn test_download_magnitude_ignores_suffix() {
    assert_eq!(parse_download_count("1.2M"), Some(1.2));
    assert_eq!(parse_download_count("900K"), Some(900.0));
    assert_eq!(parse_download_count("10M+"), Some(10.0));
}

#[test]
fn test_feeds_exclude_featured_and_use_unscaled_downloads() {
    let catalog = Catalog::builtin().unwrap();
    let featured = catalog.featured().map(|item| item.id.clone());
    assert_eq!(featured.as_deref(), Some("minecraft-pe"));

    let new = new_feed(catalog.items());
    let trending = trending_feed(catalog.items());
    assert_eq!(new.len(), catalog.len() - 1);
    assert!(new.items.iter().all(|item| !item.featured));
    assert!(trending.items.iter().all(|item| !item.featured));

    // "900K" ranks as 900, above every "N.NM" entry.
    assert_eq!(trending.items[0].id, "asphalt-9");
    assert_eq!(new.items[0].id, "spotify-premium");
}
