//! Signal handling for graceful shutdown.

use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::FeedError;

/// Spawn a task that cancels the returned token on SIGINT or SIGTERM.
///
/// Every in-flight fetch and firewall submission observes the same token,
/// so one signal stops the whole process promptly.
pub fn shutdown_token() -> Result<CancellationToken, FeedError> {
    let token = CancellationToken::new();

    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| FeedError::Config(format!("install SIGINT handler: {}", e)))?;
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| FeedError::Config(format!("install SIGTERM handler: {}", e)))?;

    let handle = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => info!("Received SIGINT, shutting down"),
            _ = sigterm.recv() => info!("Received SIGTERM, shutting down"),
        }
        handle.cancel();
    });

    Ok(token)
}
