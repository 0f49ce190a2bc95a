//! Download lifecycle sessions.
//!
//! A session walks one catalog item through
//! `Idle → CollectingCredentials → Validating → InProgress → AwaitingHandoff → Completed`,
//! with `Cancelled` reachable while validating or in progress.
//!
//! # Overview
//!
//! - [`DownloadSession`] - the synchronous state machine
//! - [`SessionRegistry`] - one slot per item; spawns runners and owns their timers
//! - [`SessionEvent`] - change notifications for the owning view
//! - [`SessionTiming`] - tick cadence and settle delay
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use storefront_core::catalog::Catalog;
//! use storefront_core::handoff::SystemLauncher;
//! use storefront_core::session::{SessionRegistry, SessionTiming};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Catalog::builtin()?;
//! let item = catalog.get("minecraft-pe").ok_or("missing item")?;
//!
//! let mut registry = SessionRegistry::new(SessionTiming::default(), Arc::new(SystemLauncher::new()));
//! registry.start(item)?;
//! registry.submit(&item.id, "Hero", "XJ9")?;
//! let done = registry.wait(&item.id).await?;
//! println!("{} finished as {}", done.item_id, done.state);
//! # Ok(())
//! # }
//! ```

pub mod constants;
mod credentials;
mod error;
mod event;
mod machine;
mod registry;
mod runner;
mod state;
mod task;
mod timing;

pub use constants::{
    CODE_REQUIRED, DEFAULT_SETTLE_DELAY, DEFAULT_TICK_INTERVAL, NAME_REQUIRED, PROGRESS_COMPLETE,
};
pub use credentials::{CredentialError, Credentials};
pub use error::{SessionError, SubmitError};
pub use event::{EventSender, SessionEvent, SessionEventKind};
pub use machine::{DownloadSession, SessionId, SessionSnapshot};
pub use registry::SessionRegistry;
pub use state::{SessionAction, SessionState, StatusBand};
pub use task::ScheduledTask;
pub use timing::SessionTiming;
