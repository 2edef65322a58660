//! Message store clients.
//!
//! Every store honours the same lossy contract: a failed read degrades to an
//! empty list and a failed write to `false`, with the cause logged instead of
//! returned. Callers cannot tell "store unreachable" from "store empty".
//!
//! - `http`: the real store, `GET`/`POST <base>/chats` with JSON bodies
//! - `dummy`: an in-memory store used for offline demos and tests

mod dummy;
mod http;

pub use dummy::DummyStore;
pub use http::{HttpStore, TransportError};

use std::future::Future;
use std::sync::Arc;

use crate::message::Message;

/// Read/write access to the remote message list.
pub trait MessageStore: Send + Sync + 'static {
    /// Fetch every message, in store order. Empty on any failure.
    fn fetch_all(&self) -> impl Future<Output = Vec<Message>> + Send;

    /// Post a message. `true` only when the store accepted it.
    fn post(&self, author: &str, body: &str) -> impl Future<Output = bool> + Send;
}

impl<T: MessageStore> MessageStore for Arc<T> {
    fn fetch_all(&self) -> impl Future<Output = Vec<Message>> + Send {
        T::fetch_all(self)
    }

    fn post(&self, author: &str, body: &str) -> impl Future<Output = bool> + Send {
        T::post(self, author, body)
    }
}
