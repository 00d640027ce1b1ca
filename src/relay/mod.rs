//! Session issuance subsystem.
//!
//! # Data Flow
//! ```text
//! handler asks for a session
//!     → client.rs (fresh anonymous user id, POST {api_base}/sessions
//!       with the bearer credential and feature-negotiation header)
//!     → types.rs (parse either client_secret shape, normalize to
//!       SessionToken before anything else touches it)
//!     → error.rs (upstream rejection vs transport failure, each with
//!       its own diagnostic payload)
//! ```
//!
//! # Security Constraints
//! - The credential ONLY travels as the outbound Authorization header
//! - Never log the credential or an issued client secret
//! - Every outbound call is bounded by the configured timeout
//! - No retries here; the browser retries on failure

pub mod client;
pub mod error;
pub mod types;

pub use client::{anonymous_user_id, UpstreamClient};
pub use error::{RelayError, RelayResult};
pub use types::SessionToken;
