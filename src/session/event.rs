//! Session change notifications delivered to the owning view.

use tokio::sync::{mpsc, watch};
use tracing::trace;

use super::machine::{DownloadSession, SessionSnapshot};
use crate::handoff::HandoffOutcome;

/// What happened to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEventKind {
    /// The session entered `snapshot.state`.
    Transition,
    /// Progress advanced without a state change.
    Progress,
    /// Hand-off ran; the session is now completed.
    HandedOff(HandoffOutcome),
    /// An invariant violation aborted the session.
    Aborted(String),
}

/// One notification: the session's state after the change, and the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub snapshot: SessionSnapshot,
    pub kind: SessionEventKind,
}

impl SessionEvent {
    /// Whether no further events will follow for this session.
    #[must_use]
    pub fn is_final(&self) -> bool {
        matches!(
            self.kind,
            SessionEventKind::HandedOff(_) | SessionEventKind::Aborted(_)
        ) || self.snapshot.state.is_terminal()
    }
}

/// Sender half for session events.
pub type EventSender = mpsc::UnboundedSender<SessionEvent>;

/// Fans one session's changes out to the registry (latest snapshot) and to
/// the optional event stream.
#[derive(Debug)]
pub(crate) struct Publisher {
    latest: watch::Sender<SessionSnapshot>,
    events: Option<EventSender>,
}

impl Publisher {
    pub(crate) fn new(
        initial: SessionSnapshot,
        events: Option<EventSender>,
    ) -> (Self, watch::Receiver<SessionSnapshot>) {
        let (latest, receiver) = watch::channel(initial);
        (Self { latest, events }, receiver)
    }

    pub(crate) fn publish(&self, session: &DownloadSession, kind: SessionEventKind) {
        let snapshot = session.snapshot();
        self.latest.send_replace(snapshot.clone());
        emit(self.events.as_ref(), snapshot, kind);
    }
}

/// Sends an event if anyone is listening. A closed receiver means the view
/// stopped observing, which is not an error for the session.
pub(crate) fn emit(events: Option<&EventSender>, snapshot: SessionSnapshot, kind: SessionEventKind) {
    let Some(events) = events else {
        return;
    };
    if events.send(SessionEvent { snapshot, kind }).is_err() {
        trace!("session event receiver closed");
    }
}
