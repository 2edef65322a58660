//! In-memory message store for offline use.
//!
//! Serves a canned conversation so the client can be tried without a
//! server. Latency and outages can be simulated, which the backend tests
//! rely on.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, warn};

use super::MessageStore;
use crate::message::Message;

/// Conversation served in dummy mode
const SAMPLE_CONVERSATION: &[(&str, &str)] = &[
    ("Ada", "Morning! Anyone around?"),
    ("Linus", "Yep, just pulled the latest changes."),
    ("Ada", "Nice. Did the build go green for you?"),
    ("Grace", "It did here. Check https://example.com/ci for the logs."),
    ("Linus", "All good on my side too."),
];

#[derive(Debug, Default)]
pub struct DummyStore {
    messages: Mutex<Vec<Message>>,
    latency: Duration,
    offline: AtomicBool,
    fetch_count: AtomicUsize,
    post_count: AtomicUsize,
}

impl DummyStore {
    /// An empty store with no latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with the sample conversation.
    pub fn seeded() -> Self {
        Self::with_messages(
            SAMPLE_CONVERSATION
                .iter()
                .zip(1u64..)
                .map(|((author, body), id)| Message::new(id, *author, *body))
                .collect(),
        )
    }

    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            messages: Mutex::new(messages),
            ..Self::default()
        }
    }

    /// Delay every request by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make every request fail until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of `fetch_all` calls so far.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    /// Number of `post` calls so far.
    pub fn post_count(&self) -> usize {
        self.post_count.load(Ordering::SeqCst)
    }

    fn is_offline(&self) -> bool {
        self.offline.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl MessageStore for DummyStore {
    async fn fetch_all(&self) -> Vec<Message> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.is_offline() {
            warn!("failed to fetch messages: dummy store is offline");
            return Vec::new();
        }

        let messages = self
            .messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        debug!(count = messages.len(), "fetched messages from dummy store");
        messages
    }

    async fn post(&self, author: &str, body: &str) -> bool {
        self.post_count.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.is_offline() {
            warn!("failed to post message: dummy store is offline");
            return false;
        }

        let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
        let id = messages.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        messages.push(Message::new(id, author, body));
        debug!(id, "dummy store accepted message");
        true
    }
}
