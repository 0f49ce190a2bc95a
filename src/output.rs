//! CLI output formatting and display helpers.

use storefront_core::{CatalogItem, Feed};

/// Message when no subcommand was given.
pub const NO_COMMAND_GUIDANCE: &str = "No command given. Search the catalog or start a download.";

/// Example for searching.
pub const SEARCH_EXAMPLE: &str = "Example: storefront search minecraft";

/// Example for downloading.
pub const DOWNLOAD_EXAMPLE: &str =
    "Example: storefront download minecraft-pe --name Hero --code XJ9";

/// Shown when a query matches nothing.
pub const NO_RESULTS: &str = "No results found";

/// Tags shown next to a title in result rows.
const ROW_TAG_COUNT: usize = 2;

/// Returns terminal width from COLUMNS, or 80 if unset/invalid.
pub fn terminal_width() -> usize {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|width| *width >= 20)
        .unwrap_or(80)
}

/// Truncates text to at most `width` chars, appending ellipsis if truncated.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let text_len = text.chars().count();
    if text_len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    if width == 1 {
        return "…".to_string();
    }

    let mut output: String = text.chars().take(width - 1).collect();
    output.push('…');
    output
}

/// Returns quick-start guidance lines truncated to width.
pub fn quick_start_guidance_lines(width: usize) -> Vec<String> {
    vec![
        truncate_to_width(NO_COMMAND_GUIDANCE, width),
        truncate_to_width(SEARCH_EXAMPLE, width),
        truncate_to_width(DOWNLOAD_EXAMPLE, width),
    ]
}

/// Prints quick-start guidance to stdout.
pub fn print_quick_start_guidance() {
    let width = terminal_width().min(80);
    for line in quick_start_guidance_lines(width) {
        println!("{line}");
    }
}

/// One result row: title, first two tags, category, rating.
pub fn render_item_row(item: &CatalogItem, width: usize) -> String {
    let tags = item.display_tags(ROW_TAG_COUNT).join(", ");
    let row = if tags.is_empty() {
        format!(
            "{}  ({})  rating {:.1}",
            item.title, item.category, item.rating
        )
    } else {
        format!(
            "{}  [{tags}]  ({})  rating {:.1}",
            item.title, item.category, item.rating
        )
    };
    truncate_to_width(&row, width)
}

/// Feed heading followed by up to `limit` rows; a zero limit shows every entry.
pub fn render_feed(feed: &Feed<'_>, limit: usize, width: usize) -> Vec<String> {
    let shown = if limit == 0 {
        feed.len()
    } else {
        limit.min(feed.len())
    };
    let mut lines = Vec::with_capacity(shown + 2);
    lines.push(format!("{} ({})", feed.title, feed.len()));
    lines.extend(
        feed.items
            .iter()
            .take(shown)
            .map(|item| format!("  {}", render_item_row(item, width.saturating_sub(2)))),
    );
    if shown < feed.len() {
        lines.push(format!("  … {} more", feed.len() - shown));
    }
    lines
}

/// Multi-line detail view for `show`.
pub fn render_item_details(item: &CatalogItem) -> Vec<String> {
    let mut lines = vec![
        item.title.clone(),
        format!("id: {}", item.id),
        format!("category: {}", item.category),
        format!("rating: {:.1}", item.rating),
        format!("downloads: {}", item.downloads),
        format!("size: {}", item.size),
    ];
    if !item.tags.is_empty() {
        lines.push(format!("tags: {}", item.tags.join(", ")));
    }
    if item.featured {
        lines.push("featured: yes".to_string());
    }
    lines.push(String::new());
    lines.push(item.description.clone());
    lines
}
