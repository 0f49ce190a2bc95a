//! Error types for download sessions.
//!
//! Two classes are kept apart:
//! - [`CredentialError`] (re-exported from `credentials`) is a user-facing,
//!   recoverable validation failure.
//! - [`SessionError`] is a caller or internal invariant violation. It aborts
//!   the session and is surfaced as a diagnostic, never silently absorbed.

use thiserror::Error;

use super::credentials::CredentialError;
use super::state::{SessionAction, SessionState};

/// Invariant violations and misuse of the session API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The action is not defined for the session's current state.
    #[error("cannot {action} a session in state {state}")]
    InvalidTransition {
        state: SessionState,
        action: SessionAction,
    },

    /// No session is registered for the item.
    #[error("no download session for item {0}")]
    UnknownItem(String),

    /// The item already has a session that has not finished.
    #[error("item {item_id} already has a session in state {state}")]
    Busy {
        item_id: String,
        state: SessionState,
    },

    /// The session task ended without reporting a result (panicked or aborted).
    #[error("session task for item {item_id} failed: {reason}")]
    TaskFailed { item_id: String, reason: String },
}

impl SessionError {
    pub(crate) fn invalid(state: SessionState, action: SessionAction) -> Self {
        Self::InvalidTransition { state, action }
    }
}

/// Failure of a credential submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// A field was blank; the session stays in `CollectingCredentials`.
    #[error(transparent)]
    Rejected(#[from] CredentialError),

    /// The submission itself was not valid for the session.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl SubmitError {
    /// Whether the caller should re-prompt rather than report a fault.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}
