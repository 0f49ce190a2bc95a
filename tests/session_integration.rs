//! Integration tests for download sessions and the session registry.
//!
//! Timing tests run on a paused tokio clock, so the full 100-tick run
//! completes instantly and deterministically.

use std::sync::Arc;
use std::time::Duration;

use storefront_core::session::{CODE_REQUIRED, NAME_REQUIRED};
use storefront_core::{
    Catalog, CatalogItem, DownloadSession, HandoffOutcome, RecordingLauncher, SessionEvent,
    SessionEventKind, SessionId, SessionRegistry, SessionState, SessionTiming, SubmitError,
};
use tokio::sync::mpsc;

fn catalog_item(id: &str) -> CatalogItem {
    let catalog = Catalog::builtin().unwrap();
    catalog.get(id).cloned().unwrap()
}

fn timing() -> SessionTiming {
    SessionTiming {
        tick_interval: Duration::from_millis(150),
        settle_delay: Duration::from_millis(500),
    }
}

fn drain(events: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

// ==================== State machine ====================

#[test]
fn test_whitespace_name_stays_collecting_with_name_error() {
    let item = catalog_item("subway-surfers");
    let mut session = DownloadSession::new(SessionId(1), &item);
    session.begin().unwrap();

    let err = session.submit(" ", "abc").unwrap_err();
    let SubmitError::Rejected(rejection) = err else {
        panic!("expected credential rejection");
    };
    assert_eq!(rejection.messages(), vec![NAME_REQUIRED]);
    assert_eq!(session.state(), SessionState::CollectingCredentials);
    assert!(session.credentials().is_none());
}

#[test]
fn test_both_blank_fields_report_both_errors() {
    let item = catalog_item("subway-surfers");
    let mut session = DownloadSession::new(SessionId(1), &item);
    session.begin().unwrap();

    let SubmitError::Rejected(rejection) = session.submit("", "  ").unwrap_err() else {
        panic!("expected credential rejection");
    };
    assert_eq!(rejection.messages(), vec![NAME_REQUIRED, CODE_REQUIRED]);
}

#[test]
fn test_valid_credentials_reach_in_progress_at_zero() {
    let item = catalog_item("subway-surfers");
    let mut session = DownloadSession::new(SessionId(1), &item);
    session.begin().unwrap();
    session.submit("Hero", "XJ9").unwrap();
    assert_eq!(session.state(), SessionState::Validating);

    session.start_progress().unwrap();
    assert_eq!(session.state(), SessionState::InProgress);
    assert_eq!(session.progress(), 0);
}

// ==================== Registry runs ====================

#[tokio::test(start_paused = true)]
async fn test_progress_runs_zero_to_hundred_and_completes_once() {
    let (tx, mut events) = mpsc::unbounded_channel();
    let launcher = Arc::new(RecordingLauncher::new());
    let mut registry = SessionRegistry::new(timing(), launcher.clone()).with_events(tx);
    let item = catalog_item("clash-royale");

    registry.start(&item).unwrap();
    registry.submit(&item.id, "Hero", "XJ9").unwrap();
    let done = registry.wait(&item.id).await.unwrap();
    assert_eq!(done.state, SessionState::Completed);

    let events = drain(&mut events);
    let in_progress: Vec<u8> = events
        .iter()
        .filter(|event| event.snapshot.state == SessionState::InProgress)
        .map(|event| event.snapshot.progress)
        .collect();
    assert_eq!(in_progress, (0..100).collect::<Vec<u8>>());

    let handed_off: Vec<&SessionEvent> = events
        .iter()
        .filter(|event| matches!(event.kind, SessionEventKind::HandedOff(_)))
        .collect();
    assert_eq!(handed_off.len(), 1);
    assert_eq!(handed_off[0].snapshot.state, SessionState::Completed);
    assert_eq!(handed_off[0].snapshot.progress, 100);
    assert_eq!(
        launcher.calls(),
        vec![(HandoffOutcome::OpenedExternally, item.download_url.clone())]
    );
}

#[tokio::test(start_paused = true)]
async fn test_two_items_tick_independently() {
    let launcher = Arc::new(RecordingLauncher::new());
    let mut registry = SessionRegistry::new(timing(), launcher.clone());
    let first = catalog_item("spotify-premium");
    let second = catalog_item("capcut-pro");

    registry.start(&first).unwrap();
    registry.submit(&first.id, "Hero", "XJ9").unwrap();
    tokio::time::sleep(Duration::from_millis(150 * 40 + 10)).await;

    registry.start(&second).unwrap();
    assert_eq!(
        registry.snapshot(&second.id).unwrap().state,
        SessionState::CollectingCredentials
    );
    let first_progress = registry.snapshot(&first.id).unwrap().progress;
    assert_eq!(first_progress, 40);

    registry.submit(&second.id, "Hero", "XJ9").unwrap();
    tokio::time::sleep(Duration::from_millis(150 * 10 + 10)).await;
    assert_eq!(registry.snapshot(&first.id).unwrap().progress, 50);
    assert_eq!(registry.snapshot(&second.id).unwrap().progress, 10);

    registry.cancel(&second.id).unwrap();
    let cancelled = registry.wait(&second.id).await.unwrap();
    assert_eq!(cancelled.state, SessionState::Cancelled);

    let completed = registry.wait(&first.id).await.unwrap();
    assert_eq!(completed.state, SessionState::Completed);
    assert_eq!(launcher.calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_refused_open_falls_back_to_redirect() {
    let launcher = Arc::new(RecordingLauncher::refusing());
    let (tx, mut events) = mpsc::unbounded_channel();
    let mut registry = SessionRegistry::new(timing(), launcher.clone()).with_events(tx);
    let item = catalog_item("youtube-vanced");

    registry.start(&item).unwrap();
    registry.submit(&item.id, "Hero", "XJ9").unwrap();
    registry.wait(&item.id).await.unwrap();

    let last = drain(&mut events).pop().unwrap();
    assert_eq!(last.kind, SessionEventKind::HandedOff(HandoffOutcome::Redirected));
    assert_eq!(
        launcher.calls(),
        vec![(HandoffOutcome::Redirected, item.download_url.clone())]
    );
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_progress_never_hands_off() {
    let launcher = Arc::new(RecordingLauncher::new());
    let mut registry = SessionRegistry::new(timing(), launcher.clone());
    let item = catalog_item("stumble-guys");

    registry.start(&item).unwrap();
    registry.submit(&item.id, "Hero", "XJ9").unwrap();
    tokio::time::sleep(Duration::from_secs(3)).await;
    registry.cancel(&item.id).unwrap();

    let done = registry.wait(&item.id).await.unwrap();
    assert_eq!(done.state, SessionState::Cancelled);
    assert!(done.progress < 100);
    tokio::time::sleep(timing().total_duration()).await;
    assert!(launcher.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_registry_releases_timers() {
    let launcher = Arc::new(RecordingLauncher::new());
    let mut registry = SessionRegistry::new(timing(), launcher.clone());
    let item = catalog_item("asphalt-9");

    registry.start(&item).unwrap();
    registry.submit(&item.id, "Hero", "XJ9").unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    drop(registry);

    tokio::time::sleep(timing().total_duration() * 2).await;
    assert!(launcher.calls().is_empty());
}
