//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → structured tracing events (stdout, EnvFilter-controlled)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Structured key-value logging via `tracing`
//! - Metrics are cheap (atomic increments) and never load-bearing

pub mod metrics;
