//! ChatKit Session Relay
//!
//! A small credential-injecting relay built with Tokio and Axum. Browsers ask
//! it for a chat session; it calls the hosted ChatKit API with the server-held
//! key and hands the short-lived client secret back.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────┐
//!     Browser        │              SESSION RELAY                │      ChatKit API
//!     ───────────────┼─▶ http (router, CORS, ─▶ relay (anon user ┼─▶ POST /sessions
//!     POST /session/…│    trace, timeouts)      id, bearer auth) │   Authorization:
//!                    │                                │          │   Bearer <key>
//!     {client_secret,│                                ▼          │
//!      expires_at}   │           normalize {client_secret}       │
//!     ◀──────────────┼───────────── or {error: …} ◀──────────────┼◀─ 2xx / 4xx / 5xx
//!                    │                                           │
//!                    │  ┌─────────────────────────────────────┐  │
//!                    │  │        Cross-Cutting Concerns       │  │
//!                    │  │  ┌────────┐ ┌───────────┐ ┌──────┐  │  │
//!                    │  │  │ config │ │ observa-  │ │ life-│  │  │
//!                    │  │  │        │ │ bility    │ │ cycle│  │  │
//!                    │  │  └────────┘ └───────────┘ └──────┘  │  │
//!                    │  └─────────────────────────────────────┘  │
//!                    └───────────────────────────────────────────┘
//! ```
//!
//! Startup order: tracing first, then configuration (fatal on any validation
//! error), then the listener, then the server. Configuration is loaded once
//! and stays immutable for the process lifetime.

use tokio::net::TcpListener;

use chatkit_session_relay::config;
use chatkit_session_relay::http::HttpServer;
use chatkit_session_relay::lifecycle::Shutdown;
use chatkit_session_relay::observability;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    observability::logging::init();

    tracing::info!("chatkit-session-relay v{} starting", env!("CARGO_PKG_VERSION"));

    // Load configuration; missing credential or workflow id is fatal here,
    // never per-request.
    let config = match config::load_from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration rejected, refusing to start");
            return Err(e.into());
        }
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        api_base = %config.upstream.api_base,
        project_scoped = config.upstream.project.is_some(),
        session_ttl_secs = ?config.upstream.session_ttl_secs,
        upstream_timeout_secs = config.upstream.timeout_secs,
        allowed_origins = ?config.cors.allowed_origins,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Optional Prometheus exporter
    if let Some(metrics_address) = &config.observability.metrics_address {
        if let Ok(addr) = metrics_address.parse() {
            observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Create and run HTTP server; Ctrl-C or SIGTERM drains it gracefully.
    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
