//! Search command handler: rank the catalog against one query.

use anyhow::Result;
use storefront_core::{Catalog, SearchOutcome, search};
use tracing::debug;

use crate::cli::SearchArgs;
use crate::output;

pub fn run_search_command(catalog: &Catalog, args: &SearchArgs) -> Result<()> {
    let outcome = search(catalog.items(), &args.query);
    let results = match &outcome {
        SearchOutcome::Inactive => {
            println!("Enter a search term to rank the catalog.");
            return Ok(());
        }
        SearchOutcome::Active(results) => results,
    };
    debug!(query = %args.query, results = results.len(), "search ranked");

    if results.is_empty() {
        println!("{}", output::NO_RESULTS);
        return Ok(());
    }

    let width = output::terminal_width();
    for item in results {
        println!("{}", output::render_item_row(item, width));
    }
    Ok(())
}
