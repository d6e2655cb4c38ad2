//! Teardown: remove every rule group owned by the configured feeds.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::commands::build_reconcilers;
use crate::firewall::FirewallSink;

pub async fn execute(config_path: &Path, firewall: Arc<dyn FirewallSink>) -> Result<()> {
    let reconcilers = build_reconcilers(config_path, firewall)?;

    let mut failures = 0usize;
    for rec in &reconcilers {
        let prefix = rec.source().name_prefix();
        if let Err(e) = rec.delete_group().await {
            warn!("{}: teardown failed: {}", prefix, e);
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{} group(s) failed to tear down", failures);
    }
    info!("Teardown complete");
    Ok(())
}
