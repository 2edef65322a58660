use crate::message::Message;

/// Actions sent from the UI to the Backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendAction {
    /// Fetch the message list now (coalesced with a fetch already in flight)
    Refresh,
    /// Post a message to the store
    Post { author: String, body: String },
    /// Stop the backend loop
    Shutdown,
}

/// Events sent from the Backend to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuiEvent {
    /// A fetch finished. `messages` is empty when the store could not be read.
    Snapshot { seq: u64, messages: Vec<Message> },
    /// A post finished
    PostFinished { body: String, ok: bool },
    /// Backend-level problem worth showing in the status bar
    Diagnostic(String),
}
