//! Command implementations for the feedban CLI.

pub mod run;
pub mod teardown;
pub mod update;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::allowlist::{StaticWhitelist, WhitelistChecker};
use crate::config::Config;
use crate::fetcher::Fetcher;
use crate::firewall::FirewallSink;
use crate::reconciler::Reconciler;

/// Load the configuration and build one reconciler per configured feed.
///
/// Every reconciler shares the whitelist and the firewall sink; each owns
/// its own persistent network client.
pub fn build_reconcilers(
    config_path: &Path,
    firewall: Arc<dyn FirewallSink>,
) -> Result<Vec<Reconciler>> {
    let config = Config::load(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let whitelist: Option<Arc<dyn WhitelistChecker>> = {
        let entries = config.whitelist_ranges();
        if entries.is_empty() {
            None
        } else {
            Some(Arc::new(StaticWhitelist::new(entries)))
        }
    };

    let mut reconcilers = Vec::with_capacity(config.feeds.len());
    for feed in &config.feeds {
        let source = feed
            .to_source()
            .with_context(|| format!("Invalid feed '{}'", feed.name_prefix))?;
        let fetcher = Fetcher::new().context("Failed to build HTTP client")?;
        reconcilers.push(Reconciler::new(
            source,
            fetcher,
            whitelist.clone(),
            Arc::clone(&firewall),
        ));
    }

    Ok(reconcilers)
}
