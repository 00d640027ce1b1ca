//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http handlers and the upstream client produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through log events via tower-http
//! - Metrics are cheap (atomic increments)
//! - The Prometheus exporter is optional and off unless configured

pub mod logging;
pub mod metrics;
