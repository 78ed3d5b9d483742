//! OS signal handling.
//!
//! # Responsibilities
//! - Translate Ctrl+C into the internal shutdown signal
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Config is load-once, so there is no reload signal

use crate::lifecycle::Shutdown;

/// Spawn a task that triggers shutdown on Ctrl+C.
pub fn spawn_signal_handler(shutdown: Shutdown) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    });
}
