//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use storefront_core::Category;

/// Browse a game and app catalog and run simulated downloads.
///
/// Storefront ranks catalog items against free-text queries and walks an
/// item through the download lifecycle: credentials, progress, hand-off.
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Catalog JSON file (defaults to config value, then the bundled catalog)
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rank catalog items against a query
    Search(SearchArgs),
    /// Show the featured item and the New / Trending feeds
    Discover(DiscoverArgs),
    /// List every item in a category
    List(ListArgs),
    /// Show one item's details
    Show(ShowArgs),
    /// Run a download session for one item
    Download(DownloadArgs),
    /// Show the effective configuration
    Config,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SearchArgs {
    /// Free-text query; matched against title, tags, category, description
    pub query: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DiscoverArgs {
    /// Entries shown per feed (0 shows everything, like "See All")
    #[arg(short = 'n', long, default_value_t = 4)]
    pub limit: usize,
}

/// Category tab selector.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryArg {
    Games,
    Apps,
}

impl From<CategoryArg> for Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Games => Self::Game,
            CategoryArg::Apps => Self::App,
        }
    }
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ListArgs {
    #[arg(value_enum)]
    pub category: CategoryArg,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ShowArgs {
    /// Catalog item id
    pub id: String,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DownloadArgs {
    /// Catalog item id
    pub id: String,

    /// Display name to enter in the form
    #[arg(long)]
    pub name: String,

    /// Access code to enter in the form
    #[arg(long)]
    pub code: String,

    /// Milliseconds between progress ticks (1-10000)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..=10_000))]
    pub tick_ms: Option<u64>,

    /// Milliseconds to wait at 100% before hand-off (0-60000)
    #[arg(long, value_parser = clap::value_parser!(u64).range(0..=60_000))]
    pub settle_ms: Option<u64>,

    /// Skip the system opener and print the locator instead
    #[arg(long)]
    pub no_open: bool,
}
