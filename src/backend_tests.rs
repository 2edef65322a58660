//! Backend loop tests against the in-memory store

use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::protocol::{BackendAction, GuiEvent};
use crate::transport::DummyStore;

const WAIT: Duration = Duration::from_secs(3);

struct Backend {
    store: Arc<DummyStore>,
    action_tx: Sender<BackendAction>,
    event_rx: Receiver<GuiEvent>,
    handle: JoinHandle<()>,
}

fn start(store: DummyStore, refresh_interval: Duration) -> Backend {
    let store = Arc::new(store);
    let (action_tx, action_rx) = unbounded::<BackendAction>();
    let (event_tx, event_rx) = unbounded::<GuiEvent>();

    let backend_store = Arc::clone(&store);
    let handle = thread::spawn(move || {
        crate::backend::run_backend(backend_store, refresh_interval, action_rx, event_tx);
    });

    Backend {
        store,
        action_tx,
        event_rx,
        handle,
    }
}

/// Wait for the next event matching `pick`, skipping others.
fn next_matching<T>(rx: &Receiver<GuiEvent>, mut pick: impl FnMut(GuiEvent) -> Option<T>) -> T {
    let deadline = Instant::now() + WAIT;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(event) => {
                if let Some(found) = pick(event) {
                    return found;
                }
            }
            Err(e) => panic!("no matching event before timeout: {e}"),
        }
    }
}

fn next_snapshot(rx: &Receiver<GuiEvent>) -> (u64, Vec<crate::message::Message>) {
    next_matching(rx, |event| match event {
        GuiEvent::Snapshot { seq, messages } => Some((seq, messages)),
        _ => None,
    })
}

#[test]
fn test_initial_snapshot_on_start() {
    let backend = start(DummyStore::seeded(), Duration::from_secs(60));

    let (seq, messages) = next_snapshot(&backend.event_rx);
    assert_eq!(seq, 1);
    assert_eq!(messages.len(), 5);

    backend.action_tx.send(BackendAction::Shutdown).unwrap();
    backend.handle.join().unwrap();
}

#[test]
fn test_post_then_refresh_shows_message() {
    let backend = start(DummyStore::new(), Duration::from_secs(60));
    let _ = next_snapshot(&backend.event_rx);

    backend
        .action_tx
        .send(BackendAction::Post {
            author: "alice".into(),
            body: "hello".into(),
        })
        .unwrap();

    let (body, ok) = next_matching(&backend.event_rx, |event| match event {
        GuiEvent::PostFinished { body, ok } => Some((body, ok)),
        _ => None,
    });
    assert_eq!(body, "hello");
    assert!(ok);
    assert_eq!(backend.store.post_count(), 1);

    backend.action_tx.send(BackendAction::Refresh).unwrap();
    let (seq, messages) = next_snapshot(&backend.event_rx);
    assert_eq!(seq, 2);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].author, "alice");
    assert_eq!(messages[0].body, "hello");

    backend.action_tx.send(BackendAction::Shutdown).unwrap();
    backend.handle.join().unwrap();
}

#[test]
fn test_refresh_requests_coalesce_while_fetching() {
    let store = DummyStore::seeded().with_latency(Duration::from_millis(300));
    let backend = start(store, Duration::from_secs(60));

    for _ in 0..5 {
        backend.action_tx.send(BackendAction::Refresh).unwrap();
    }

    let (first, _) = next_snapshot(&backend.event_rx);
    let (second, _) = next_snapshot(&backend.event_rx);
    assert_eq!((first, second), (1, 2));

    // Nothing else queued behind the follow-up
    thread::sleep(Duration::from_millis(500));
    assert_eq!(backend.store.fetch_count(), 2);
    assert!(backend.event_rx.try_recv().is_err());

    backend.action_tx.send(BackendAction::Shutdown).unwrap();
    backend.handle.join().unwrap();
}

#[test]
fn test_ticks_keep_polling() {
    let backend = start(DummyStore::seeded(), Duration::from_millis(100));

    let seqs: Vec<u64> = (0..3).map(|_| next_snapshot(&backend.event_rx).0).collect();
    assert!(seqs.windows(2).all(|w| w[0] < w[1]));
    assert!(backend.store.fetch_count() >= 3);

    backend.action_tx.send(BackendAction::Shutdown).unwrap();
    backend.handle.join().unwrap();
}

#[test]
fn test_offline_store_degrades() {
    let backend = start(DummyStore::seeded(), Duration::from_secs(60));
    let _ = next_snapshot(&backend.event_rx);
    backend.store.set_offline(true);

    backend
        .action_tx
        .send(BackendAction::Post {
            author: "alice".into(),
            body: "lost".into(),
        })
        .unwrap();
    let ok = next_matching(&backend.event_rx, |event| match event {
        GuiEvent::PostFinished { ok, .. } => Some(ok),
        _ => None,
    });
    assert!(!ok);

    backend.action_tx.send(BackendAction::Refresh).unwrap();
    let (_, messages) = next_snapshot(&backend.event_rx);
    assert!(messages.is_empty());

    backend.action_tx.send(BackendAction::Shutdown).unwrap();
    backend.handle.join().unwrap();
}

#[test]
fn test_dropping_action_sender_stops_backend() {
    let backend = start(DummyStore::new(), Duration::from_secs(60));
    drop(backend.action_tx);
    backend.handle.join().unwrap();
}
