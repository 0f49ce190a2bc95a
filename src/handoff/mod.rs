//! External hand-off of a download locator.
//!
//! The final step of a download session opens the item's locator in a new,
//! independent viewing context. When the environment refuses (a blocked
//! popup, no desktop opener), the locator is instead redirected in the
//! current context. Both branches count as a successful hand-off.

use std::io::Write;
use std::sync::Mutex;

use thiserror::Error;
use tracing::{info, warn};

/// The environment refused to open a new viewing context.
#[derive(Debug, Error)]
#[error("could not open {url} externally: {reason}")]
pub struct HandoffError {
    pub url: String,
    pub reason: String,
}

impl HandoffError {
    pub fn new(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Which hand-off branch ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffOutcome {
    /// The locator opened in a new context.
    OpenedExternally,
    /// Opening was refused; the current context was redirected instead.
    Redirected,
}

impl HandoffOutcome {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenedExternally => "opened_externally",
            Self::Redirected => "redirected",
        }
    }
}

/// Environment primitive used for hand-off.
///
/// Implementations are shared across session tasks and must not block for
/// long: they run on the async runtime.
pub trait Launcher: Send + Sync {
    /// Opens `url` in a new, independent context.
    ///
    /// # Errors
    ///
    /// Returns [`HandoffError`] when the environment refuses.
    fn open_external(&self, url: &str) -> Result<(), HandoffError>;

    /// Sends the current context to `url`. Cannot fail.
    fn redirect(&self, url: &str);
}

/// Opens `url`, falling back to a redirect when opening is refused.
pub fn perform_handoff(launcher: &dyn Launcher, url: &str) -> HandoffOutcome {
    match launcher.open_external(url) {
        Ok(()) => {
            info!(url, "handed off to external context");
            HandoffOutcome::OpenedExternally
        }
        Err(error) => {
            warn!(%error, "external open refused, redirecting");
            launcher.redirect(url);
            HandoffOutcome::Redirected
        }
    }
}

/// Desktop launcher: the system opener for new contexts, the terminal for redirects.
#[derive(Debug, Default)]
pub struct SystemLauncher {
    /// Skip the system opener and always redirect.
    redirect_only: bool,
}

impl SystemLauncher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A launcher whose new-context attempt is always refused.
    #[must_use]
    pub fn redirect_only() -> Self {
        Self {
            redirect_only: true,
        }
    }
}

impl Launcher for SystemLauncher {
    fn open_external(&self, url: &str) -> Result<(), HandoffError> {
        if self.redirect_only {
            return Err(HandoffError::new(url, "external opening disabled"));
        }
        open::that_detached(url).map_err(|error| HandoffError::new(url, error.to_string()))
    }

    fn redirect(&self, url: &str) {
        let mut stdout = std::io::stdout().lock();
        if writeln!(stdout, "Continue your download at: {url}").is_err() {
            warn!(url, "stdout closed during redirect");
        }
    }
}

/// Launcher that records calls instead of touching the environment.
///
/// Used by tests and by callers that run sessions headless.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    refuse_open: bool,
    calls: Mutex<Vec<(HandoffOutcome, String)>>,
}

impl RecordingLauncher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A launcher that refuses every new-context attempt, like a popup blocker.
    #[must_use]
    pub fn refusing() -> Self {
        Self {
            refuse_open: true,
            ..Self::default()
        }
    }

    /// Recorded hand-offs, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<(HandoffOutcome, String)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, outcome: HandoffOutcome, url: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((outcome, url.to_string()));
        }
    }
}

impl Launcher for RecordingLauncher {
    fn open_external(&self, url: &str) -> Result<(), HandoffError> {
        if self.refuse_open {
            return Err(HandoffError::new(url, "blocked"));
        }
        self.record(HandoffOutcome::OpenedExternally, url);
        Ok(())
    }

    fn redirect(&self, url: &str) {
        self.record(HandoffOutcome::Redirected, url);
    }
}
