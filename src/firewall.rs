//! Firewall sink contract.
//!
//! The engine that programs OS-level rules lives outside this crate; this is
//! the boundary it is consumed through. A rule group is the set of firewall
//! rules whose names fall under one prefix, and the only mutation offered
//! for a group is bulk replace, never merge.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ipnet::IpNet;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::FeedError;

/// Provenance attached to a bulk group replace.
#[derive(Debug, Clone)]
pub struct GroupMetadata {
    /// Where the ranges came from (file path or URL).
    pub source: String,
    /// When the feed text was retrieved.
    pub fetched_at: DateTime<Utc>,
}

/// Collaborator contract for the firewall engine.
#[async_trait]
pub trait FirewallSink: Send + Sync {
    /// Replace the contents of rule group `name_prefix` with `ranges`.
    ///
    /// One bulk operation: prior contents under the prefix are superseded.
    /// Implementations should observe `cancel` and return
    /// [`FeedError::Cancelled`] when aborted mid-apply.
    async fn block_ranges(
        &self,
        name_prefix: &str,
        ranges: &[IpNet],
        metadata: &GroupMetadata,
        cancel: &CancellationToken,
    ) -> Result<(), FeedError>;

    /// Names of all rules currently registered under `name_prefix`.
    async fn list_rule_names(&self, name_prefix: &str) -> Result<Vec<String>, FeedError>;

    /// Delete a single named rule.
    async fn delete_rule(&self, name: &str) -> Result<(), FeedError>;
}

/// Sink that only logs what it would program. Used for dry runs and as the
/// default backend of the bundled CLI, where no real engine is wired in.
#[derive(Debug, Default)]
pub struct LoggingSink;

impl LoggingSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FirewallSink for LoggingSink {
    async fn block_ranges(
        &self,
        name_prefix: &str,
        ranges: &[IpNet],
        metadata: &GroupMetadata,
        _cancel: &CancellationToken,
    ) -> Result<(), FeedError> {
        info!(
            "Would replace group {} with {} ranges (source {}, fetched {})",
            name_prefix,
            ranges.len(),
            metadata.source,
            metadata.fetched_at
        );
        Ok(())
    }

    async fn list_rule_names(&self, _name_prefix: &str) -> Result<Vec<String>, FeedError> {
        Ok(Vec::new())
    }

    async fn delete_rule(&self, name: &str) -> Result<(), FeedError> {
        info!("Would delete rule {}", name);
        Ok(())
    }
}
