//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Keep relay and tower-http events visible by default
//!
//! # Design Decisions
//! - `RUST_LOG` overrides the built-in filter
//! - Log events carry structured fields; the upstream credential and the
//!   issued client secret are never recorded

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "chatkit_session_relay=debug,tower_http=debug,info";

/// Install the global tracing subscriber.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // try_init so a second call (tests, embedding) is a no-op.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
