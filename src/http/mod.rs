//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (sequential accept loop)
//!     → request.rs (bounded head read → RequestView)
//!     → [detection pipeline scores the view]
//!     → response.rs (synthetic 403/500/502) or proxy relay
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{ParseError, RequestView};
pub use server::WafServer;
