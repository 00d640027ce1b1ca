//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file (RELAY_CONFIG_PATH)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (environment overlay; env always wins)
//!     → validation.rs (semantic checks, all errors reported)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc to the HTTP surface and upstream client
//! ```
//!
//! # Design Decisions
//! - Config is built once at startup and never mutated; there is no reload
//!   path and no ambient/global lookup inside request handling
//! - A missing credential or workflow id is fatal at startup, never surfaced
//!   as a per-request error
//! - Validation separates syntactic (serde) from semantic checks and reports
//!   every problem, not just the first
//! - The credential is redacted from Debug output

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_from_env, ConfigError};
pub use schema::CorsConfig;
pub use schema::ListenerConfig;
pub use schema::RelayConfig;
pub use schema::UpstreamConfig;
