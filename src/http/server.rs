//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, inbound timeout)
//! - Bind server to listener
//! - Drain gracefully on shutdown
//!
//! Layer order matters: CORS sits outside the inbound timeout so that even
//! a timed-out request goes back to the browser with CORS headers, and the
//! request-id layer sits outermost so every trace span carries the id. The
//! CORS layer answers every OPTIONS request itself, so the router registers
//! no OPTIONS routes.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::schema::RelayConfig;
use crate::http::cors;
use crate::http::handlers;
use crate::relay::client::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub upstream: Arc<UpstreamClient>,
}

/// HTTP server for the session relay.
pub struct HttpServer {
    router: Router,
    config: Arc<RelayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails only if the underlying HTTP client cannot be constructed;
    /// configuration validity was already enforced at load time.
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let config = Arc::new(config);
        let upstream = Arc::new(UpstreamClient::new(config.upstream.clone())?);

        let state = AppState {
            config: config.clone(),
            upstream,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::describe))
            .route("/health", get(handlers::health))
            .route("/session/start", post(handlers::session_start))
            .route("/session/refresh", post(handlers::session_refresh))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(cors::cors_layer(&config.cors))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}
