//! HTTP client for the remote message store.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, warn};

use super::MessageStore;
use crate::message::{Message, NewMessage};

const CHATS_PATH: &str = "/chats";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const CONNECT_TIMEOUT_SECS: u64 = 5;

/// Why a store request failed. Only surfaces through logs.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("store answered {0}")]
    Status(StatusCode),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

/// Message store reached over HTTP/JSON.
#[derive(Clone, Debug)]
pub struct HttpStore {
    http: reqwest::Client,
    chats_url: String,
}

impl HttpStore {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let base_url = base_url.trim_end_matches('/');
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            chats_url: format!("{base_url}{CHATS_PATH}"),
        })
    }

    pub fn chats_url(&self) -> &str {
        &self.chats_url
    }

    /// `GET /chats`, with failures reported.
    pub async fn try_fetch_all(&self) -> Result<Vec<Message>, TransportError> {
        let response = self.http.get(&self.chats_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
    }

    /// `POST /chats`, with failures reported.
    pub async fn try_post(&self, author: &str, body: &str) -> Result<(), TransportError> {
        let response = self
            .http
            .post(&self.chats_url)
            .json(&NewMessage { author, body })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status));
        }

        // The store echoes the created record; only the status decides success.
        match response.text().await {
            Ok(text) => match serde_json::from_str::<serde_json::Value>(&text) {
                Ok(echo) => debug!(%echo, "store accepted message"),
                Err(_) => debug!(len = text.len(), "store accepted message with non-JSON body"),
            },
            Err(e) => debug!(error = %e, "store accepted message but body was unreadable"),
        }
        Ok(())
    }
}

impl MessageStore for HttpStore {
    async fn fetch_all(&self) -> Vec<Message> {
        match self.try_fetch_all().await {
            Ok(messages) => {
                debug!(count = messages.len(), "fetched messages");
                messages
            }
            Err(e) => {
                warn!(error = %e, url = %self.chats_url, "failed to fetch messages");
                Vec::new()
            }
        }
    }

    async fn post(&self, author: &str, body: &str) -> bool {
        match self.try_post(author, body).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, url = %self.chats_url, "failed to post message");
                false
            }
        }
    }
}
