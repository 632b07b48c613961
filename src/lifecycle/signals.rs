//! OS signal handling.

use crate::lifecycle::Shutdown;

/// Wait for Ctrl+C and trigger `shutdown`.
///
/// If the handler cannot be installed, shutdown is left to other triggers.
pub async fn shutdown_on_ctrl_c(shutdown: Shutdown) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
        Err(err) => tracing::error!(error = %err, "Failed to listen for Ctrl+C"),
    }
}
