//! Download command handler: run one session with a progress bar.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use storefront_core::{
    Catalog, CatalogItem, HandoffOutcome, Launcher, SessionEvent, SessionEventKind,
    SessionRegistry, SessionState, SessionTiming, SubmitError, SystemLauncher,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::app_config::ResolvedSettings;
use crate::cli::DownloadArgs;

/// How a download run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DownloadSummary {
    Completed(HandoffOutcome),
    Cancelled,
}

pub async fn run_download_command(
    catalog: &Catalog,
    args: &DownloadArgs,
    settings: &ResolvedSettings,
    show_progress: bool,
) -> Result<()> {
    let Some(item) = catalog.get(&args.id) else {
        bail!("Unknown catalog item: '{}'", args.id);
    };
    let launcher: Arc<dyn Launcher> = if settings.open_externally {
        Arc::new(SystemLauncher::new())
    } else {
        Arc::new(SystemLauncher::redirect_only())
    };

    let summary = drive_download(
        item,
        &args.name,
        &args.code,
        settings.timing,
        launcher,
        show_progress,
    )
    .await?;

    match summary {
        DownloadSummary::Completed(HandoffOutcome::OpenedExternally) => {
            println!("{} is ready and was opened externally.", item.title);
        }
        DownloadSummary::Completed(HandoffOutcome::Redirected) => {
            println!("{} is ready.", item.title);
        }
        DownloadSummary::Cancelled => {
            println!("Download of {} cancelled.", item.title);
        }
    }
    Ok(())
}

/// Runs one session for `item` to its end, cancelling it on Ctrl-C.
pub(crate) async fn drive_download(
    item: &CatalogItem,
    display_name: &str,
    access_code: &str,
    timing: SessionTiming,
    launcher: Arc<dyn Launcher>,
    show_progress: bool,
) -> Result<DownloadSummary> {
    let (events_tx, mut events) = mpsc::unbounded_channel();
    let mut registry = SessionRegistry::new(timing, launcher).with_events(events_tx);

    registry.start(item)?;
    match registry.submit(&item.id, display_name, access_code) {
        Ok(session) => debug!(%session, "credentials accepted"),
        Err(SubmitError::Rejected(rejection)) => {
            for message in rejection.messages() {
                eprintln!("{message}");
            }
            registry.cancel(&item.id)?;
            bail!("Credentials rejected for '{}'", item.id);
        }
        Err(error) => return Err(error.into()),
    }

    let progress = if show_progress {
        progress_bar()
    } else {
        ProgressBar::hidden()
    };
    let mut handoff = None;
    let mut cancel_requested = false;

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                if let SessionEventKind::HandedOff(outcome) = &event.kind {
                    handoff = Some(*outcome);
                }
                render_event(&progress, &event);
                if event.is_final() {
                    break;
                }
            }
            signal = tokio::signal::ctrl_c(), if !cancel_requested => {
                signal.context("Failed to listen for Ctrl-C")?;
                cancel_requested = true;
                match registry.cancel(&item.id) {
                    Ok(()) => info!(item_id = %item.id, "cancellation requested"),
                    Err(error) => warn!(%error, "session can no longer be cancelled"),
                }
            }
        }
    }
    progress.finish_and_clear();

    let finished = registry.wait(&item.id).await?;
    match (finished.state, handoff) {
        (SessionState::Completed, Some(outcome)) => Ok(DownloadSummary::Completed(outcome)),
        (SessionState::Cancelled, _) => Ok(DownloadSummary::Cancelled),
        (state, _) => bail!("Session for '{}' ended in unexpected state {state}", item.id),
    }
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

fn render_event(progress: &ProgressBar, event: &SessionEvent) {
    let snapshot = &event.snapshot;
    match &event.kind {
        SessionEventKind::Progress | SessionEventKind::Transition => {
            progress.set_position(u64::from(snapshot.progress));
            if let Some(status) = snapshot.status() {
                progress.set_message(status.as_str());
            } else {
                progress.set_message(snapshot.state.as_str());
            }
            if snapshot.state == SessionState::AwaitingHandoff {
                progress.finish_with_message("Almost ready");
            }
        }
        SessionEventKind::HandedOff(outcome) => {
            debug!(outcome = outcome.as_str(), "hand-off finished");
        }
        SessionEventKind::Aborted(reason) => {
            progress.abandon_with_message(format!("Aborted: {reason}"));
        }
    }
}
