//! The download session state machine.
//!
//! [`DownloadSession`] is synchronous and owns no timers: every method is one
//! transition that either succeeds immediately or returns a
//! [`SessionError`]. Timing lives in the runner.

use std::fmt;

use tracing::debug;

use super::constants::PROGRESS_COMPLETE;
use super::credentials::Credentials;
use super::error::{SessionError, SubmitError};
use super::state::{SessionAction, SessionState, StatusBand};
use crate::catalog::CatalogItem;
use crate::handoff::HandoffOutcome;

/// Identifier distinguishing successive sessions, including for the same item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Point-in-time view of a session, as delivered to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub item_id: String,
    pub state: SessionState,
    pub progress: u8,
}

impl SessionSnapshot {
    /// Status text while progress is shown; `None` in other states.
    #[must_use]
    pub fn status(&self) -> Option<StatusBand> {
        matches!(
            self.state,
            SessionState::InProgress | SessionState::AwaitingHandoff
        )
        .then(|| StatusBand::for_progress(self.progress))
    }
}

/// One run of the download lifecycle for one catalog item.
#[derive(Debug, Clone)]
pub struct DownloadSession {
    id: SessionId,
    item_id: String,
    download_url: String,
    state: SessionState,
    progress: u8,
    credentials: Option<Credentials>,
    handoff: Option<HandoffOutcome>,
}

impl DownloadSession {
    /// Creates an idle session targeting `item`.
    #[must_use]
    pub fn new(id: SessionId, item: &CatalogItem) -> Self {
        Self {
            id,
            item_id: item.id.clone(),
            download_url: item.download_url.clone(),
            state: SessionState::Idle,
            progress: 0,
            credentials: None,
            handoff: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    #[must_use]
    pub fn download_url(&self) -> &str {
        &self.download_url
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Progress in percent; only meaningful while in progress or awaiting hand-off.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    #[must_use]
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Which hand-off branch ran, once completed.
    #[must_use]
    pub fn handoff(&self) -> Option<HandoffOutcome> {
        self.handoff
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            item_id: self.item_id.clone(),
            state: self.state,
            progress: self.progress,
        }
    }

    /// Idle → CollectingCredentials.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] from any other state.
    pub fn begin(&mut self) -> Result<(), SessionError> {
        self.expect_state(SessionState::Idle, SessionAction::Begin)?;
        self.transition(SessionState::CollectingCredentials);
        Ok(())
    }

    /// CollectingCredentials → Validating when both fields are non-blank.
    ///
    /// On a blank field the state is unchanged and the field messages are
    /// returned for re-display.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Rejected`] for blank fields, [`SubmitError::Session`]
    /// when not collecting credentials.
    pub fn submit(&mut self, display_name: &str, access_code: &str) -> Result<(), SubmitError> {
        self.expect_state(SessionState::CollectingCredentials, SessionAction::Submit)?;
        let credentials = Credentials::validate(display_name, access_code)?;
        self.credentials = Some(credentials);
        self.transition(SessionState::Validating);
        Ok(())
    }

    /// Validating → InProgress at 0%.
    ///
    /// Validation has no further checks, so this always succeeds from
    /// `Validating`.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] from any other state.
    pub fn start_progress(&mut self) -> Result<(), SessionError> {
        self.expect_state(SessionState::Validating, SessionAction::StartProgress)?;
        self.progress = 0;
        self.transition(SessionState::InProgress);
        Ok(())
    }

    /// Advances progress by one; at 100% moves to AwaitingHandoff.
    ///
    /// Returns the new progress value.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless in progress. A tick arriving
    /// after 100% is such a violation.
    pub fn tick(&mut self) -> Result<u8, SessionError> {
        self.expect_state(SessionState::InProgress, SessionAction::Tick)?;
        self.progress += 1;
        if self.progress >= PROGRESS_COMPLETE {
            self.transition(SessionState::AwaitingHandoff);
        }
        Ok(self.progress)
    }

    /// AwaitingHandoff → Completed, recording which hand-off branch ran.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] from any other state, which also
    /// makes a second completion an error.
    pub fn complete(&mut self, outcome: HandoffOutcome) -> Result<(), SessionError> {
        self.expect_state(SessionState::AwaitingHandoff, SessionAction::Complete)?;
        self.handoff = Some(outcome);
        self.transition(SessionState::Completed);
        Ok(())
    }

    /// Cancels the session.
    ///
    /// While collecting credentials this returns to Idle and discards any
    /// input. Once validated or in progress it ends in Cancelled.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] when idle, awaiting hand-off, or
    /// already terminal.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::CollectingCredentials => {
                self.credentials = None;
                self.transition(SessionState::Idle);
                Ok(())
            }
            SessionState::Validating | SessionState::InProgress => {
                self.credentials = None;
                self.transition(SessionState::Cancelled);
                Ok(())
            }
            state => Err(SessionError::invalid(state, SessionAction::Cancel)),
        }
    }

    fn expect_state(&self, expected: SessionState, action: SessionAction) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionError::invalid(self.state, action))
        }
    }

    fn transition(&mut self, next: SessionState) {
        debug!(
            session = %self.id,
            item_id = %self.item_id,
            from = %self.state,
            to = %next,
            progress = self.progress,
            "session transition"
        );
        self.state = next;
    }
}
