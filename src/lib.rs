//! miniwaf — inline ML-scored web application firewall.
//!
//! Sits between clients and a single protected backend: each request head
//! is parsed, summarized into a 22-slot feature vector, scored by a small
//! pretrained MLP, and either relayed to the backend byte-for-byte or
//! answered with a synthetic block page.

pub mod config;
pub mod detection;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::WafConfig;
pub use http::WafServer;
pub use lifecycle::Shutdown;
