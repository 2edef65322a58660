//! Chat message records as exchanged with the message store.

use serde::{Deserialize, Serialize};

/// Longest body the store accepts, counted in characters (not bytes).
pub const MAX_BODY_CHARS: usize = 140;

/// A message as returned by `GET /chats`.
///
/// `id` is assigned by the store and increases monotonically; the store is
/// the only authority on ordering and identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    #[serde(rename = "username")]
    pub author: String,
    #[serde(rename = "message")]
    pub body: String,
}

impl Message {
    pub fn new(id: u64, author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            author: author.into(),
            body: body.into(),
        }
    }
}

/// Request body for `POST /chats`.
#[derive(Debug, Serialize)]
pub struct NewMessage<'a> {
    #[serde(rename = "username")]
    pub author: &'a str,
    #[serde(rename = "message")]
    pub body: &'a str,
}

/// A validated message waiting to be posted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outgoing {
    pub author: String,
    pub body: String,
}
