//! One-shot update: give every due feed a single cycle.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

use crate::commands::build_reconcilers;
use crate::firewall::FirewallSink;
use crate::reconciler::{Updatable, UpdateOutcome};
use crate::signal::shutdown_token;

pub async fn execute(config_path: &Path, firewall: Arc<dyn FirewallSink>) -> Result<()> {
    let mut reconcilers = build_reconcilers(config_path, firewall)?;
    let cancel = shutdown_token()?;

    let mut failures = 0usize;
    for rec in &mut reconcilers {
        if cancel.is_cancelled() {
            info!("Shutdown requested, stopping update");
            break;
        }
        let prefix = rec.source().name_prefix().to_string();
        match rec.update(&cancel).await {
            Ok(UpdateOutcome::Applied { ranges }) => {
                info!("{}: applied {} ranges", prefix, ranges);
            }
            Ok(UpdateOutcome::Skipped) => {
                info!("{}: not due yet", prefix);
            }
            Err(e) if e.is_cancelled() => {
                info!("{}: cancelled", prefix);
                break;
            }
            Err(e) => {
                warn!("{}: update failed: {}", prefix, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} feed(s) failed to update", failures);
    }
    Ok(())
}
