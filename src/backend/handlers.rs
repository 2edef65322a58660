//! UI action handling and store task completion for the backend loop.

use std::ops::ControlFlow;
use std::sync::Arc;

use tokio::task::JoinError;
use tracing::{debug, warn};

use super::main_loop::{BackendState, FetchOutcome, PostOutcome};
use crate::protocol::{BackendAction, GuiEvent};
use crate::transport::MessageStore;

impl<S: MessageStore> BackendState<S> {
    /// Apply one UI action. `Break` stops the loop.
    pub(super) fn handle_action(&mut self, action: BackendAction) -> ControlFlow<()> {
        match action {
            BackendAction::Refresh => match self.gate.request() {
                Some(seq) => self.spawn_fetch(seq),
                None => debug!("refresh requested while fetching; follow-up queued"),
            },
            BackendAction::Post { author, body } => self.spawn_post(author, body),
            BackendAction::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Periodic refresh tick
    pub(super) fn on_tick(&mut self) {
        match self.gate.tick() {
            Some(seq) => self.spawn_fetch(seq),
            None => debug!("refresh tick skipped; fetch still in flight"),
        }
    }

    pub(super) fn on_fetch_joined(&mut self, joined: Result<FetchOutcome, JoinError>) {
        match joined {
            Ok(FetchOutcome { seq, messages }) => {
                debug!(seq, count = messages.len(), "fetch finished");
                let _ = self.event_tx.send(GuiEvent::Snapshot { seq, messages });
            }
            Err(e) => warn!(error = %e, "fetch task died"),
        }

        if let Some(seq) = self.gate.complete() {
            self.spawn_fetch(seq);
        }
    }

    pub(super) fn on_post_joined(&mut self, joined: Result<PostOutcome, JoinError>) {
        match joined {
            Ok(PostOutcome { body, ok }) => {
                let _ = self.event_tx.send(GuiEvent::PostFinished { body, ok });
            }
            Err(e) => warn!(error = %e, "post task died"),
        }
    }

    fn spawn_fetch(&mut self, seq: u64) {
        let store = Arc::clone(&self.store);
        self.fetches.spawn(async move {
            let messages = store.fetch_all().await;
            FetchOutcome { seq, messages }
        });
    }

    fn spawn_post(&mut self, author: String, body: String) {
        let store = Arc::clone(&self.store);
        self.posts.spawn(async move {
            let ok = store.post(&author, &body).await;
            PostOutcome { body, ok }
        });
    }
}
