//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Init tracing/metrics → Bind listener → Run
//!
//! Shutdown (shutdown.rs):
//!     Signal received → accept loop observes it between connections → Exit
//!
//! Signals (signals.rs):
//!     SIGINT (Ctrl+C) → trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - The in-flight connection finishes before the loop exits; there is at
//!   most one, so no draining phase is needed

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
