//! Browse command handlers: discover feeds, category lists, item details.

use anyhow::{Result, bail};
use storefront_core::Catalog;
use storefront_core::catalog::{category_feed, new_feed, trending_feed};

use crate::cli::{DiscoverArgs, ListArgs, ShowArgs};
use crate::output;

pub fn run_discover_command(catalog: &Catalog, args: &DiscoverArgs) -> Result<()> {
    let width = output::terminal_width();

    if let Some(featured) = catalog.featured() {
        println!("Featured");
        println!("  {}", output::render_item_row(featured, width.saturating_sub(2)));
        println!();
    }

    let items = catalog.items();
    for line in output::render_feed(&new_feed(items), args.limit, width) {
        println!("{line}");
    }
    println!();
    for line in output::render_feed(&trending_feed(items), args.limit, width) {
        println!("{line}");
    }
    Ok(())
}

pub fn run_list_command(catalog: &Catalog, args: &ListArgs) -> Result<()> {
    let feed = category_feed(catalog.items(), args.category.into());
    for line in output::render_feed(&feed, 0, output::terminal_width()) {
        println!("{line}");
    }
    Ok(())
}

pub fn run_show_command(catalog: &Catalog, args: &ShowArgs) -> Result<()> {
    let Some(item) = catalog.get(&args.id) else {
        bail!("Unknown catalog item: '{}'", args.id);
    };
    for line in output::render_item_details(item) {
        println!("{line}");
    }
    Ok(())
}
