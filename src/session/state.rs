//! Session states, actions, and progress status bands.

use std::fmt;

/// Lifecycle state of a download session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// No download requested.
    Idle,
    /// Waiting for display name and access code.
    CollectingCredentials,
    /// Credentials accepted; about to start progress.
    Validating,
    /// Simulated progress is ticking.
    InProgress,
    /// Progress hit 100%; waiting out the settle delay before hand-off.
    AwaitingHandoff,
    /// Hand-off performed.
    Completed,
    /// Abandoned mid-progress.
    Cancelled,
}

impl SessionState {
    /// Returns the stable string label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CollectingCredentials => "collecting_credentials",
            Self::Validating => "validating",
            Self::InProgress => "in_progress",
            Self::AwaitingHandoff => "awaiting_handoff",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Terminal states free the item's slot for a fresh session.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// States in which the item's slot is held: neither idle nor terminal.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle) && !self.is_terminal()
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Requested transition, named for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Begin,
    Submit,
    Cancel,
    StartProgress,
    Tick,
    Complete,
}

impl SessionAction {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::Submit => "submit",
            Self::Cancel => "cancel",
            Self::StartProgress => "start_progress",
            Self::Tick => "tick",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Cosmetic description of progress shown next to the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBand {
    Initializing,
    Connecting,
    PreparingFiles,
    AlmostReady,
}

impl StatusBand {
    /// Band for a progress value: [0,30) [30,60) [60,90) [90,100].
    #[must_use]
    pub fn for_progress(progress: u8) -> Self {
        match progress {
            0..30 => Self::Initializing,
            30..60 => Self::Connecting,
            60..90 => Self::PreparingFiles,
            _ => Self::AlmostReady,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initializing => "Initializing",
            Self::Connecting => "Connecting",
            Self::PreparingFiles => "Preparing files",
            Self::AlmostReady => "Almost ready",
        }
    }
}

impl fmt::Display for StatusBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state_as_str() {
        assert_eq!(SessionState::Idle.as_str(), "idle");
        assert_eq!(
            SessionState::CollectingCredentials.to_string(),
            "collecting_credentials"
        );
        assert_eq!(SessionState::AwaitingHandoff.as_str(), "awaiting_handoff");
    }

    #[test]
    fn test_terminal_and_active_partition() {
        assert!(SessionState::Completed.is_terminal());
        assert!(SessionState::Cancelled.is_terminal());
        assert!(!SessionState::Idle.is_active());
        assert!(!SessionState::Completed.is_active());
        for state in [
            SessionState::CollectingCredentials,
            SessionState::Validating,
            SessionState::InProgress,
            SessionState::AwaitingHandoff,
        ] {
            assert!(state.is_active(), "{state} should hold the slot");
        }
    }

    #[test]
    fn test_status_band_boundaries() {
        assert_eq!(StatusBand::for_progress(0), StatusBand::Initializing);
        assert_eq!(StatusBand::for_progress(29), StatusBand::Initializing);
        assert_eq!(StatusBand::for_progress(30), StatusBand::Connecting);
        assert_eq!(StatusBand::for_progress(59), StatusBand::Connecting);
        assert_eq!(StatusBand::for_progress(60), StatusBand::PreparingFiles);
        assert_eq!(StatusBand::for_progress(89), StatusBand::PreparingFiles);
        assert_eq!(StatusBand::for_progress(90), StatusBand::AlmostReady);
        assert_eq!(StatusBand::for_progress(100), StatusBand::AlmostReady);
        assert_eq!(StatusBand::PreparingFiles.to_string(), "Preparing files");
    }
}
