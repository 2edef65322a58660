//! Backend event loop: refresh tick, UI actions and store task completion.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use tokio::runtime::Runtime;
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use super::gate::RefreshGate;
use crate::message::Message;
use crate::protocol::{BackendAction, GuiEvent};
use crate::transport::MessageStore;

/// How often the loop wakes to drain UI actions when nothing else happens
const ACTION_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of a fetch task
pub(super) struct FetchOutcome {
    pub seq: u64,
    pub messages: Vec<Message>,
}

/// Result of a post task
pub(super) struct PostOutcome {
    pub body: String,
    pub ok: bool,
}

/// State owned by the backend loop
pub(super) struct BackendState<S> {
    pub store: Arc<S>,
    pub gate: RefreshGate,
    /// Holds at most one task; the gate guarantees it
    pub fetches: JoinSet<FetchOutcome>,
    pub posts: JoinSet<PostOutcome>,
    pub event_tx: Sender<GuiEvent>,
}

/// Run the backend event loop on a tokio runtime
///
/// Returns when the UI sends `Shutdown` or drops its action sender.
pub fn run_backend<S: MessageStore>(
    store: S,
    refresh_interval: Duration,
    action_rx: Receiver<BackendAction>,
    event_tx: Sender<GuiEvent>,
) {
    // Create a Tokio runtime for this thread
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            let _ = event_tx.send(GuiEvent::Diagnostic(format!(
                "Failed to create Tokio runtime: {}",
                e
            )));
            return;
        }
    };

    rt.block_on(async move {
        let mut state = BackendState {
            store: Arc::new(store),
            gate: RefreshGate::new(),
            fetches: JoinSet::new(),
            posts: JoinSet::new(),
            event_tx,
        };

        // First tick fires immediately, which gives the initial load
        let mut ticker = tokio::time::interval(refresh_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(?refresh_interval, "backend started");

        loop {
            // Check for actions from the UI (non-blocking)
            loop {
                match action_rx.try_recv() {
                    Ok(action) => {
                        if state.handle_action(action).is_break() {
                            info!("backend shutting down");
                            return;
                        }
                    }
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        debug!("UI dropped its action channel; backend exiting");
                        return;
                    }
                }
            }

            tokio::select! {
                _ = ticker.tick() => state.on_tick(),
                Some(joined) = state.fetches.join_next() => state.on_fetch_joined(joined),
                Some(joined) = state.posts.join_next() => state.on_post_joined(joined),
                () = tokio::time::sleep(ACTION_POLL_INTERVAL) => {}
            }
        }
    });
}
