//! Continuous scheduler: re-offer every feed a cycle on a fixed cadence.
//!
//! Each pass walks the reconcilers sequentially; the per-source rate gate
//! decides which of them actually fetch. The tick only bounds how soon a
//! due source is noticed.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::commands::build_reconcilers;
use crate::firewall::FirewallSink;
use crate::reconciler::{Updatable, UpdateOutcome};
use crate::signal::shutdown_token;

pub async fn execute(config_path: &Path, firewall: Arc<dyn FirewallSink>, tick: u64) -> Result<()> {
    let mut reconcilers = build_reconcilers(config_path, firewall)?;
    let cancel = shutdown_token()?;

    info!(
        "Scheduling {} feed(s), checking every {}s",
        reconcilers.len(),
        tick
    );

    let mut interval = tokio::time::interval(Duration::from_secs(tick.max(1)));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        for rec in &mut reconcilers {
            if cancel.is_cancelled() {
                break;
            }
            let prefix = rec.source().name_prefix().to_string();
            match rec.update(&cancel).await {
                Ok(UpdateOutcome::Applied { ranges }) => {
                    info!("{}: applied {} ranges", prefix, ranges);
                }
                Ok(UpdateOutcome::Skipped) => {}
                Err(e) if e.is_cancelled() => break,
                Err(e) => warn!("{}: update failed: {}", prefix, e),
            }
        }
    }

    info!("Scheduler stopped");
    Ok(())
}
