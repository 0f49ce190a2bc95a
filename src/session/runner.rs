//! Async driver for the timed part of a session.
//!
//! One runner task owns one [`DownloadSession`] from `Validating` until it
//! ends, so no two ticks can ever race on the same session.

use std::sync::Arc;

use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span};

use super::error::SessionError;
use super::event::{Publisher, SessionEventKind};
use super::machine::{DownloadSession, SessionSnapshot};
use super::state::SessionState;
use super::timing::SessionTiming;
use crate::handoff::{Launcher, perform_handoff};

/// Runs `session` from `Validating` to `Completed` or `Cancelled`.
///
/// `cancel` is honoured until the last tick. Once progress reaches 100 the
/// session is awaiting hand-off and a late cancel is ignored.
///
/// An invariant violation is published as [`SessionEventKind::Aborted`]
/// before the error is returned.
pub(crate) async fn run_session(
    session: DownloadSession,
    timing: SessionTiming,
    launcher: Arc<dyn Launcher>,
    cancel: CancellationToken,
    publisher: Publisher,
) -> Result<SessionSnapshot, SessionError> {
    let span = info_span!("session", id = %session.id(), item_id = %session.item_id());
    async move {
        let mut session = session;
        match drive(&mut session, timing, launcher.as_ref(), &cancel, &publisher).await {
            Ok(()) => Ok(session.snapshot()),
            Err(violation) => {
                error!(%violation, state = %session.state(), "session aborted");
                publisher.publish(&session, SessionEventKind::Aborted(violation.to_string()));
                Err(violation)
            }
        }
    }
    .instrument(span)
    .await
}

async fn drive(
    session: &mut DownloadSession,
    timing: SessionTiming,
    launcher: &dyn Launcher,
    cancel: &CancellationToken,
    publisher: &Publisher,
) -> Result<(), SessionError> {
    session.start_progress()?;
    publisher.publish(session, SessionEventKind::Transition);

    let mut ticker = time::interval_at(Instant::now() + timing.tick_interval, timing.tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while session.state() == SessionState::InProgress {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                session.cancel()?;
                info!(progress = session.progress(), "download cancelled");
                publisher.publish(session, SessionEventKind::Transition);
                return Ok(());
            }
            _ = ticker.tick() => {
                session.tick()?;
                let kind = if session.state() == SessionState::InProgress {
                    SessionEventKind::Progress
                } else {
                    SessionEventKind::Transition
                };
                publisher.publish(session, kind);
            }
        }
    }

    if cancel.is_cancelled() {
        debug!("cancel arrived at 100%, handing off anyway");
    }
    time::sleep(timing.settle_delay).await;
    let outcome = perform_handoff(launcher, session.download_url());
    session.complete(outcome)?;
    publisher.publish(session, SessionEventKind::HandedOff(outcome));
    Ok(())
}
