//! Feed retrieval from local files and network endpoints.

use std::time::Duration;

use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::FeedError;
use crate::source::FeedLocation;

const TIMEOUT_SECS: u64 = 30;

/// Maximum feed size (10 MB). The largest known public blocklist is around
/// 1.2 MB, so this leaves ample margin while bounding memory.
const MAX_FEED_SIZE: usize = 10 * 1024 * 1024;

/// Retrieves feed text from a [`FeedLocation`].
///
/// Owns a persistent HTTP client for the component's lifetime; the client is
/// released when the fetcher is dropped and must not be shared. A fetch is a
/// single attempt with no internal retry; any failure surfaces to the caller.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Create a fetcher with default settings (30s timeout).
    pub fn new() -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .user_agent(format!("feedban/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FeedError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Create a fetcher with a custom client (tests, advanced config).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Resolve a location into raw feed text, honoring cancellation.
    ///
    /// Cancellation aborts the in-flight read or request and surfaces as
    /// [`FeedError::Cancelled`]; everything else is [`FeedError::FetchFailed`].
    pub async fn fetch(
        &self,
        location: &FeedLocation,
        cancel: &CancellationToken,
    ) -> Result<String, FeedError> {
        if cancel.is_cancelled() {
            return Err(FeedError::Cancelled);
        }

        match location {
            FeedLocation::File(path) => {
                debug!("Reading feed file {}", path.display());
                tokio::select! {
                    _ = cancel.cancelled() => Err(FeedError::Cancelled),
                    res = tokio::fs::read_to_string(path) => res.map_err(|e| {
                        FeedError::FetchFailed(format!("read {}: {}", path.display(), e))
                    }),
                }
            }
            FeedLocation::Http(url) => self.fetch_http(url, cancel).await,
        }
    }

    async fn fetch_http(&self, url: &str, cancel: &CancellationToken) -> Result<String, FeedError> {
        debug!("Fetching feed {}", url);

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(FeedError::Cancelled),
            res = self.client.get(url).send() => {
                res.map_err(|e| FeedError::FetchFailed(format!("{}: {}", url, e)))?
            }
        };

        if !response.status().is_success() {
            return Err(FeedError::FetchFailed(format!(
                "{}: HTTP {}",
                url,
                response.status()
            )));
        }

        // Reject oversized feeds before downloading when the server says so.
        if let Some(length) = response.content_length() {
            if length as usize > MAX_FEED_SIZE {
                return Err(FeedError::FetchFailed(format!(
                    "{}: response too large ({} bytes, max {})",
                    url, length, MAX_FEED_SIZE
                )));
            }
        }

        let body = tokio::select! {
            _ = cancel.cancelled() => return Err(FeedError::Cancelled),
            res = response.text() => {
                res.map_err(|e| FeedError::FetchFailed(format!("{}: body read: {}", url, e)))?
            }
        };

        // Servers without Content-Length get checked after the fact.
        if body.len() > MAX_FEED_SIZE {
            return Err(FeedError::FetchFailed(format!(
                "{}: response too large ({} bytes, max {})",
                url,
                body.len(),
                MAX_FEED_SIZE
            )));
        }

        Ok(body)
    }
}
