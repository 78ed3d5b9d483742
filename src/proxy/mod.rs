//! Decision and forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! accepted TcpStream
//!     → mediator.rs (read head → parse → extract → score)
//!         → benign   → relay.rs (backend connect, head forward, byte relay)
//!         → malicious → http::response::forbidden
//!     → counters.rs (one increment on the taken branch)
//! ```
//!
//! # Design Decisions
//! - All request-level failures resolve inside the mediator; the accept
//!   loop only observes an [`mediator::Outcome`]
//! - Exactly one backend attempt per request, no retries: the constrained
//!   deployment favors failing fast over masking backend trouble

pub mod counters;
pub mod mediator;
pub mod relay;

pub use counters::{CounterSnapshot, Counters};
pub use mediator::{mediate, Outcome};

/// Failures on the forwarding path.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The outbound connect failed or timed out; nothing was sent.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(#[source] std::io::Error),

    /// The backend stopped sending mid-response; `relayed` bytes already
    /// reached the client and stand as-is.
    #[error("backend relay timed out after {relayed} bytes")]
    RelayTimeout { relayed: u64 },

    /// Transport error while forwarding or relaying.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
