//! UI-side sync loop: drains backend events into the session and forwards
//! user intents to the backend.

use chrono::{DateTime, Local};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use tracing::{debug, info, warn};

use crate::config::Theme;
use crate::protocol::{BackendAction, GuiEvent};
use crate::session::ChatSession;
use crate::view::ChatView;

pub struct ChatClient<V: ChatView> {
    pub session: ChatSession,
    pub view: V,
    action_tx: Sender<BackendAction>,
    event_rx: Receiver<GuiEvent>,
    /// Seq of the newest snapshot applied; older ones are dropped
    last_applied_seq: Option<u64>,
    /// When the last snapshot arrived. A failed fetch also yields a
    /// (empty) snapshot, so this marks an attempt, not a success.
    last_fetch: Option<DateTime<Local>>,
    /// Last backend diagnostic, shown in the status bar
    status: Option<String>,
    backend_gone: bool,
    /// A post was sent and its result has not come back yet
    post_in_flight: bool,
}

impl<V: ChatView> ChatClient<V> {
    pub fn new(
        session: ChatSession,
        view: V,
        action_tx: Sender<BackendAction>,
        event_rx: Receiver<GuiEvent>,
    ) -> Self {
        Self {
            session,
            view,
            action_tx,
            event_rx,
            last_applied_seq: None,
            last_fetch: None,
            status: None,
            backend_gone: false,
            post_in_flight: false,
        }
    }

    pub fn last_fetch(&self) -> Option<DateTime<Local>> {
        self.last_fetch
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Show `text` in the status line.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(text.into());
    }

    pub fn post_in_flight(&self) -> bool {
        self.post_in_flight
    }

    pub fn backend_gone(&self) -> bool {
        self.backend_gone
    }

    /// Ask the backend for a fresh snapshot.
    pub fn refresh(&mut self) {
        self.send(BackendAction::Refresh);
    }

    /// Post the pending input if it is valid; invalid input is a silent no-op.
    /// Only one post is outstanding at a time. Returns whether anything was
    /// sent.
    pub fn send_current_input(&mut self) -> bool {
        if self.post_in_flight {
            debug!("post already in flight; ignoring send");
            return false;
        }
        let Some(outgoing) = self.session.take_outgoing() else {
            return false;
        };
        debug!(chars = outgoing.body.chars().count(), "posting message");
        self.send(BackendAction::Post {
            author: outgoing.author,
            body: outgoing.body,
        });
        self.post_in_flight = !self.backend_gone;
        self.post_in_flight
    }

    /// Apply everything the backend has sent since the last frame.
    /// Returns the number of events handled.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            match self.event_rx.try_recv() {
                Ok(event) => {
                    handled += 1;
                    self.handle_event(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.backend_gone {
                        warn!("backend event channel closed");
                        self.status = Some("Backend stopped".to_string());
                        self.backend_gone = true;
                    }
                    break;
                }
            }
        }
        handled
    }

    fn handle_event(&mut self, event: GuiEvent) {
        match event {
            GuiEvent::Snapshot { seq, messages } => {
                if self.last_applied_seq.is_some_and(|last| seq <= last) {
                    debug!(seq, "dropping stale snapshot");
                    return;
                }
                self.last_applied_seq = Some(seq);
                self.last_fetch = Some(Local::now());
                self.session.apply_snapshot(messages, &mut self.view);
            }
            GuiEvent::PostFinished { body, ok } => {
                self.post_in_flight = false;
                if self.session.confirm_post(&body, ok) {
                    self.refresh();
                } else {
                    info!("message was not accepted; input kept");
                }
            }
            GuiEvent::Diagnostic(text) => {
                warn!(%text, "backend diagnostic");
                self.status = Some(text);
            }
        }
    }

    pub fn tick_visibility(&mut self) -> bool {
        self.session.tick_visibility(&mut self.view)
    }

    pub fn jump_to_bottom(&mut self) {
        self.session.jump_to_bottom(&mut self.view);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.session.toggle_theme(&mut self.view)
    }

    pub fn set_current_user(&mut self, user: impl Into<String>) {
        self.session.set_current_user(user, &mut self.view);
    }

    /// Tell the backend to stop. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.send(BackendAction::Shutdown);
    }

    fn send(&mut self, action: BackendAction) {
        if self.action_tx.send(action).is_err() && !self.backend_gone {
            warn!("backend action channel closed");
            self.status = Some("Backend stopped".to_string());
            self.backend_gone = true;
        }
    }
}
