//! Per-view registry of download sessions.
//!
//! The registry holds at most one slot per catalog item. A slot is either a
//! session still collecting credentials (owned inline, synchronous) or a
//! running session (owned by a spawned runner task). Dropping the registry
//! aborts every runner, releasing its timers whatever state it is in.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use super::error::{SessionError, SubmitError};
use super::event::{EventSender, Publisher, SessionEventKind, emit};
use super::machine::{DownloadSession, SessionId, SessionSnapshot};
use super::runner::run_session;
use super::state::{SessionAction, SessionState};
use super::task::ScheduledTask;
use super::timing::SessionTiming;
use crate::catalog::CatalogItem;
use crate::handoff::Launcher;

type RunnerResult = Result<SessionSnapshot, SessionError>;

#[derive(Debug)]
enum Slot {
    Collecting(DownloadSession),
    Running(RunningSession),
}

#[derive(Debug)]
struct RunningSession {
    task: ScheduledTask<RunnerResult>,
    cancel: CancellationToken,
    latest: watch::Receiver<SessionSnapshot>,
}

impl Slot {
    fn snapshot(&self) -> SessionSnapshot {
        match self {
            Self::Collecting(session) => session.snapshot(),
            Self::Running(running) => running.latest.borrow().clone(),
        }
    }

    /// Whether the slot still holds its item, i.e. a new session may not start.
    fn is_live(&self) -> bool {
        match self {
            Self::Collecting(session) => session.state().is_active(),
            Self::Running(running) => {
                !running.task.is_finished() && !running.latest.borrow().state.is_terminal()
            }
        }
    }
}

/// Owns every in-flight download session of one view.
pub struct SessionRegistry {
    timing: SessionTiming,
    launcher: Arc<dyn Launcher>,
    events: Option<EventSender>,
    slots: HashMap<String, Slot>,
    next_id: u64,
}

impl std::fmt::Debug for SessionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRegistry")
            .field("timing", &self.timing)
            .field("slots", &self.slots.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl SessionRegistry {
    #[must_use]
    pub fn new(timing: SessionTiming, launcher: Arc<dyn Launcher>) -> Self {
        Self {
            timing,
            launcher,
            events: None,
            slots: HashMap::new(),
            next_id: 1,
        }
    }

    /// Delivers every session change on `events`.
    #[must_use]
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    #[must_use]
    pub fn timing(&self) -> SessionTiming {
        self.timing
    }

    /// Opens a session for `item` and moves it to `CollectingCredentials`.
    ///
    /// A finished (completed or cancelled) session for the same item is
    /// disposed first.
    ///
    /// # Errors
    ///
    /// [`SessionError::Busy`] if the item already has a live session.
    #[instrument(skip_all, fields(item_id = %item.id))]
    pub fn start(&mut self, item: &CatalogItem) -> Result<SessionId, SessionError> {
        if let Some(slot) = self.slots.get(&item.id)
            && slot.is_live()
        {
            return Err(SessionError::Busy {
                item_id: item.id.clone(),
                state: slot.snapshot().state,
            });
        }

        let id = SessionId(self.next_id);
        self.next_id += 1;

        let mut session = DownloadSession::new(id, item);
        session.begin()?;
        emit(
            self.events.as_ref(),
            session.snapshot(),
            SessionEventKind::Transition,
        );
        debug!(session = %id, "session started");
        self.slots.insert(item.id.clone(), Slot::Collecting(session));
        Ok(id)
    }

    /// Submits credentials for the item's session.
    ///
    /// On success the session is handed to a runner task and progresses on
    /// its own; on a blank field it keeps collecting.
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Rejected`] for blank fields; [`SubmitError::Session`]
    /// if the item has no session collecting credentials.
    #[instrument(skip_all, fields(item_id = %item_id))]
    pub fn submit(
        &mut self,
        item_id: &str,
        display_name: &str,
        access_code: &str,
    ) -> Result<SessionId, SubmitError> {
        let slot = self
            .slots
            .get_mut(item_id)
            .ok_or_else(|| SessionError::UnknownItem(item_id.to_string()))?;
        let session = match slot {
            Slot::Collecting(session) => session,
            Slot::Running(running) => {
                let state = running.latest.borrow().state;
                return Err(SessionError::invalid(state, SessionAction::Submit).into());
            }
        };

        if let Err(error) = session.submit(display_name, access_code) {
            debug!(%error, "credentials rejected");
            return Err(error);
        }
        emit(
            self.events.as_ref(),
            session.snapshot(),
            SessionEventKind::Transition,
        );

        let session = session.clone();
        let id = session.id();
        let cancel = CancellationToken::new();
        let (publisher, latest) = Publisher::new(session.snapshot(), self.events.clone());
        let task = ScheduledTask::spawn(run_session(
            session,
            self.timing,
            Arc::clone(&self.launcher),
            cancel.clone(),
            publisher,
        ));
        *slot = Slot::Running(RunningSession {
            task,
            cancel,
            latest,
        });
        info!(session = %id, "download session running");
        Ok(id)
    }

    /// Cancels the item's session.
    ///
    /// While collecting credentials the session returns to idle and its slot
    /// is freed. While running, the runner is signalled and ends in
    /// `Cancelled` before its next tick. A signal that races the final tick
    /// is ignored and the session still hands off.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownItem`] if there is no session, or
    /// [`SessionError::InvalidTransition`] if it can no longer be cancelled.
    #[instrument(skip_all, fields(item_id = %item_id))]
    pub fn cancel(&mut self, item_id: &str) -> Result<(), SessionError> {
        let slot = self
            .slots
            .get_mut(item_id)
            .ok_or_else(|| SessionError::UnknownItem(item_id.to_string()))?;

        match slot {
            Slot::Collecting(session) => {
                session.cancel()?;
                emit(
                    self.events.as_ref(),
                    session.snapshot(),
                    SessionEventKind::Transition,
                );
                self.slots.remove(item_id);
                debug!("credential collection cancelled");
                Ok(())
            }
            Slot::Running(running) => {
                let state = running.latest.borrow().state;
                if !matches!(state, SessionState::Validating | SessionState::InProgress) {
                    return Err(SessionError::invalid(state, SessionAction::Cancel));
                }
                running.cancel.cancel();
                debug!("running session signalled to cancel");
                Ok(())
            }
        }
    }

    /// Latest snapshot of the item's session, if any.
    #[must_use]
    pub fn snapshot(&self, item_id: &str) -> Option<SessionSnapshot> {
        self.slots.get(item_id).map(Slot::snapshot)
    }

    /// Number of sessions currently holding their item.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.values().filter(|slot| slot.is_live()).count()
    }

    /// Waits for the item's running session to finish and disposes of it.
    ///
    /// # Errors
    ///
    /// Returns the runner's [`SessionError`], [`SessionError::TaskFailed`]
    /// if the runner panicked, or [`SessionError::UnknownItem`] if the item
    /// has no running session.
    pub async fn wait(&mut self, item_id: &str) -> Result<SessionSnapshot, SessionError> {
        let running = match self.slots.remove(item_id) {
            Some(Slot::Running(running)) => running,
            Some(collecting @ Slot::Collecting(_)) => {
                self.slots.insert(item_id.to_string(), collecting);
                return Err(SessionError::UnknownItem(item_id.to_string()));
            }
            None => return Err(SessionError::UnknownItem(item_id.to_string())),
        };

        match running.task.join().await {
            Ok(result) => result,
            Err(join_error) => Err(SessionError::TaskFailed {
                item_id: item_id.to_string(),
                reason: join_error.to_string(),
            }),
        }
    }

    /// Disposes of finished sessions; returns how many were removed.
    pub fn reap(&mut self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, slot| slot.is_live());
        let reaped = before - self.slots.len();
        if reaped > 0 {
            debug!(reaped, "finished sessions disposed");
        }
        reaped
    }
}

impl Drop for SessionRegistry {
    fn drop(&mut self) {
        let live = self.active_count();
        if live > 0 {
            warn!(live, "registry dropped with live sessions; aborting runners");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{Category, test_item};
    use crate::handoff::RecordingLauncher;
    use std::time::Duration;

    fn registry() -> (SessionRegistry, Arc<RecordingLauncher>) {
        let launcher = Arc::new(RecordingLauncher::new());
        (
            SessionRegistry::new(SessionTiming::default(), launcher.clone()),
            launcher,
        )
    }

    #[tokio::test]
    async fn test_start_moves_to_collecting() {
        let (mut registry, _) = registry();
        let item = test_item("g1", "Game", Category::Game, 4.0, "1K");
        registry.start(&item).unwrap();
        assert_eq!(
            registry.snapshot("g1").unwrap().state,
            SessionState::CollectingCredentials
        );
        assert_eq!(registry.active_count(), 1);
    }

    #[tokio::test]
    async fn test_second_start_while_live_is_busy() {
        let (mut registry, _) = registry();
        let item = test_item("g1", "Game", Category::Game, 4.0, "1K");
        registry.start(&item).unwrap();
        let err = registry.start(&item).unwrap_err();
        assert!(matches!(err, SessionError::Busy { .. }));
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_slot_collecting() {
        let (mut registry, _) = registry();
        let item = test_item("g1", "Game", Category::Game, 4.0, "1K");
        registry.start(&item).unwrap();
        let err = registry.submit("g1", "", "code").unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(
            registry.snapshot("g1").unwrap().state,
            SessionState::CollectingCredentials
        );
    }

    #[tokio::test]
    async fn test_cancel_collecting_frees_slot() {
        let (mut registry, _) = registry();
        let item = test_item("g1", "Game", Category::Game, 4.0, "1K");
        registry.start(&item).unwrap();
        registry.cancel("g1").unwrap();
        assert!(registry.snapshot("g1").is_none());
        registry.start(&item).unwrap();
    }

    #[tokio::test]
    async fn test_unknown_item_errors() {
        let (mut registry, _) = registry();
        assert!(matches!(
            registry.cancel("nope"),
            Err(SessionError::UnknownItem(_))
        ));
        assert!(!registry.submit("nope", "a", "b").unwrap_err().is_recoverable());
        assert!(registry.wait("nope").await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_session_can_be_restarted() {
        let (mut registry, launcher) = registry();
        let item = test_item("g1", "Game", Category::Game, 4.0, "1K");
        let first = registry.start(&item).unwrap();
        registry.submit("g1", "Hero", "XJ9").unwrap();
        let done = registry.wait("g1").await.unwrap();
        assert_eq!(done.state, SessionState::Completed);
        assert_eq!(launcher.calls().len(), 1);

        let second = registry.start(&item).unwrap();
        assert!(second > first);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reap_disposes_finished_sessions() {
        let (mut registry, _) = registry();
        let item = test_item("g1", "Game", Category::Game, 4.0, "1K");
        registry.start(&item).unwrap();
        registry.submit("g1", "Hero", "XJ9").unwrap();
        assert_eq!(registry.reap(), 0);

        tokio::time::sleep(registry.timing().total_duration() + Duration::from_secs(1)).await;
        assert_eq!(registry.snapshot("g1").unwrap().state, SessionState::Completed);
        assert_eq!(registry.reap(), 1);
        assert!(registry.snapshot("g1").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_registry_aborts_runner() {
        let (mut registry, launcher) = registry();
        let item = test_item("g1", "Game", Category::Game, 4.0, "1K");
        registry.start(&item).unwrap();
        registry.submit("g1", "Hero", "XJ9").unwrap();
        let timing = registry.timing();
        drop(registry);

        tokio::time::sleep(timing.total_duration() * 2).await;
        assert!(launcher.calls().is_empty(), "aborted runner must not hand off");
    }
}
