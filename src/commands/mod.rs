//! CLI command handlers.

mod browse;
mod config;
mod download;
mod search;

pub use browse::{run_discover_command, run_list_command, run_show_command};
pub use config::run_config_show_command;
pub use download::run_download_command;
pub use search::run_search_command;
