//! Storefront Core Library
//!
//! This library provides the core of a catalog storefront: relevance-ranked
//! search over games and apps, and the download session lifecycle that
//! collects credentials, simulates progress, and hands the item's locator
//! off to the environment.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`catalog`] - Catalog items, loading, and discover/category feeds
//! - [`search`] - Pure relevance-ranked search and caller-held search state
//! - [`session`] - Download session state machine, runners, and registry
//! - [`handoff`] - Opening (or redirecting to) a download locator

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod handoff;
pub mod search;
pub mod session;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, CatalogItem, Category, Feed, parse_download_count};
pub use handoff::{HandoffOutcome, Launcher, RecordingLauncher, SystemLauncher};
pub use search::{MAX_SEARCH_RESULTS, SearchOutcome, SearchState, SearchTransition, search};
pub use session::{
    CredentialError, DownloadSession, SessionError, SessionEvent, SessionEventKind, SessionId,
    SessionRegistry, SessionSnapshot, SessionState, SessionTiming, StatusBand, SubmitError,
};
