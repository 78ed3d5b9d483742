//! Gateway server setup and accept loop.
//!
//! # Responsibilities
//! - Own the validated configuration and the request counters
//! - Accept client connections and hand each to the mediator
//! - Observe the shutdown signal between connections
//!
//! # Design Decisions
//! - Strictly sequential: one connection is mediated to completion before
//!   the next `accept()`; matching the constrained deployment the model was
//!   tuned for. A parallel rewrite would spawn the mediator per connection;
//!   every piece of shared state is already immutable or atomic.
//! - Accept errors are logged and skipped, never fatal

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::WafConfig;
use crate::proxy::{mediate, Counters};

/// The WAF gateway server.
pub struct WafServer {
    config: WafConfig,
    counters: Arc<Counters>,
}

impl WafServer {
    /// Create a new server with the given configuration.
    pub fn new(config: WafConfig) -> Self {
        Self {
            config,
            counters: Arc::new(Counters::new()),
        }
    }

    /// Handle to the request counters, for stats logging and tests.
    pub fn counters(&self) -> Arc<Counters> {
        Arc::clone(&self.counters)
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &WafConfig {
        &self.config
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            backend = %self.config.backend.address,
            threshold = self.config.detection.threshold,
            "WAF gateway listening"
        );

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            tracing::trace!(peer = %peer, "Connection accepted");
                            let outcome = mediate(stream, &self.config, &self.counters).await;
                            tracing::trace!(peer = %peer, outcome = ?outcome, "Connection done");
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Accept failed");
                        }
                    }
                }
                _ = shutdown.recv() => {
                    break;
                }
            }
        }

        let snap = self.counters.snapshot();
        tracing::info!(
            total = snap.requests,
            allowed = snap.allowed,
            blocked = snap.blocked,
            "WAF gateway stopped"
        );
        Ok(())
    }
}
