//! Error types for feedban.

use thiserror::Error;

/// Errors surfaced by one reconciliation cycle.
///
/// Per-line parse failures are not represented here: malformed feed entries
/// are skipped silently so that one bad line never aborts ingestion of the
/// valid ones. Individual teardown deletion failures are likewise the
/// firewall collaborator's concern and are only logged.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Non-success HTTP status or I/O failure while retrieving the feed.
    /// Not retried internally; the caller decides what to do.
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// Cancellation was observed mid-fetch or mid-apply. Distinct from
    /// [`FeedError::FetchFailed`] so callers can treat shutdown as benign.
    #[error("operation cancelled")]
    Cancelled,

    /// The firewall collaborator rejected the bulk group-replace.
    #[error("firewall apply failed: {0}")]
    ApplyFailed(String),

    /// Invalid configuration (bad interval, non-HTTPS URL, ...).
    #[error("configuration error: {0}")]
    Config(String),
}

impl FeedError {
    /// True if this error is a cancellation rather than a real failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FeedError::Cancelled)
    }
}
