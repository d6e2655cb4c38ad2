//! Reconciliation of one feed source against its firewall rule group.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::allowlist::{filter_whitelisted, WhitelistChecker};
use crate::error::FeedError;
use crate::fetcher::Fetcher;
use crate::firewall::{FirewallSink, GroupMetadata};
use crate::parser::parse_feed;
use crate::source::FeedSource;

/// Result of one `update` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The rate gate suppressed the cycle; nothing was fetched or applied.
    Skipped,
    /// A full cycle ran and the group was replaced with this many ranges.
    Applied { ranges: usize },
}

/// Contract exposed to the outer scheduler: something that can be asked to
/// refresh itself, repeatedly and with cancellation.
///
/// Implementations are driven by exactly one caller at a time; invoking
/// `update` concurrently on the same value is not supported.
#[async_trait]
pub trait Updatable: Send {
    async fn update(&mut self, cancel: &CancellationToken) -> Result<UpdateOutcome, FeedError>;
}

/// Orchestrates fetch → parse → filter → apply for one [`FeedSource`].
///
/// Holds the source's rate-gate bookkeeping, the HTTP client (via
/// [`Fetcher`]), an optional whitelist evaluator, and the firewall sink the
/// resulting group is pushed to. Dropping the reconciler releases the
/// network client.
pub struct Reconciler {
    source: FeedSource,
    fetcher: Fetcher,
    whitelist: Option<Arc<dyn WhitelistChecker>>,
    firewall: Arc<dyn FirewallSink>,
}

impl Reconciler {
    pub fn new(
        source: FeedSource,
        fetcher: Fetcher,
        whitelist: Option<Arc<dyn WhitelistChecker>>,
        firewall: Arc<dyn FirewallSink>,
    ) -> Self {
        Self {
            source,
            fetcher,
            whitelist,
            firewall,
        }
    }

    pub fn source(&self) -> &FeedSource {
        &self.source
    }

    /// Remove every firewall rule registered under this source's prefix.
    ///
    /// Deletions are issued independently and fire-and-forget: a failed
    /// deletion is logged and the rest proceed. The source itself is left
    /// untouched and may be re-registered with a scheduler afterwards.
    pub async fn delete_group(&self) -> Result<(), FeedError> {
        let prefix = self.source.name_prefix();
        let names = self.firewall.list_rule_names(prefix).await?;
        info!("Tearing down {} rules under {}", names.len(), prefix);

        for name in names {
            if let Err(e) = self.firewall.delete_rule(&name).await {
                warn!("Failed to delete rule {}: {}", name, e);
            }
        }
        Ok(())
    }

    async fn run_cycle(&mut self, cancel: &CancellationToken) -> Result<UpdateOutcome, FeedError> {
        let location = self.source.location().clone();
        let text = self.fetcher.fetch(&location, cancel).await?;
        let fetched_at = Utc::now();

        let candidates = parse_feed(&text);
        debug!(
            "Parsed {} candidate ranges from {}",
            candidates.len(),
            location
        );

        let ranges = filter_whitelisted(candidates, self.whitelist.as_deref());

        let metadata = GroupMetadata {
            source: location.to_string(),
            fetched_at,
        };
        self.firewall
            .block_ranges(self.source.name_prefix(), &ranges, &metadata, cancel)
            .await?;

        info!(
            "Replaced group {} with {} ranges",
            self.source.name_prefix(),
            ranges.len()
        );
        Ok(UpdateOutcome::Applied {
            ranges: ranges.len(),
        })
    }
}

#[async_trait]
impl Updatable for Reconciler {
    /// Run one reconciliation cycle if the rate gate allows it.
    ///
    /// The gate's last-run time advances as soon as a cycle is authorized;
    /// it is not rolled back when the cycle later fails or is cancelled, so
    /// the next eligible attempt is a full interval away.
    async fn update(&mut self, cancel: &CancellationToken) -> Result<UpdateOutcome, FeedError> {
        if !self.source.should_run(Instant::now()) {
            return Ok(UpdateOutcome::Skipped);
        }
        self.run_cycle(cancel).await
    }
}
