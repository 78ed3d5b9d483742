//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → WafConfig (validated, immutable)
//!     → shared by value with the server
//! ```
//!
//! # Design Decisions
//! - Config is loaded once at startup and immutable afterwards; neither the
//!   model nor its thresholds are hot-reloadable
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{BackendConfig, DetectionConfig, ListenerConfig, TimeoutConfig, WafConfig};
