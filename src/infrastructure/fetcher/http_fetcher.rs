//! HTTP transport for emoji downloads.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use crate::domain::errors::GalleryError;
use crate::domain::ports::EmojiFetcherPort;

const USER_AGENT: &str = concat!("emojiclip/", env!("CARGO_PKG_VERSION"));

/// `reqwest`-backed implementation of [`EmojiFetcherPort`].
pub struct HttpEmojiFetcher {
    client: Client,
}

impl HttpEmojiFetcher {
    /// Creates a client. Without `timeout` the transport default applies.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(timeout: Option<Duration>) -> Result<Self, GalleryError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| GalleryError::fetch("", format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl EmojiFetcherPort for HttpEmojiFetcher {
    async fn fetch_bytes(&self, url: &str) -> Result<Bytes, GalleryError> {
        debug!(url = %url, "Downloading emoji");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url = %url, error = %e, "Emoji request failed");
            if e.is_timeout() {
                GalleryError::fetch(url, "request timed out")
            } else if e.is_connect() {
                GalleryError::fetch(url, "failed to connect")
            } else {
                GalleryError::fetch(url, e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Emoji request rejected");
            return Err(GalleryError::fetch(url, format!("HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GalleryError::fetch(url, format!("failed to read body: {e}")))?;

        debug!(url = %url, size = bytes.len(), "Emoji downloaded");
        Ok(bytes)
    }
}
