//! Inbound endpoint handlers.
//!
//! Session issuance and renewal both funnel into the same upstream call:
//! the relay never performs a true refresh, it mints a new token every
//! time. That keeps one code path and one failure surface, and the browser
//! cannot tell the difference.

use std::time::Instant;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::response::relay_error_response;
use crate::http::server::AppState;
use crate::observability::metrics;

/// Service identifier reported by the descriptor endpoint.
pub const SERVICE_NAME: &str = "chatkit-session-relay";

const ENDPOINTS: &[&str] = &["/", "/health", "/session/start", "/session/refresh"];

#[derive(Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ServiceDescriptor {
    pub ok: bool,
    pub service: &'static str,
    pub endpoints: &'static [&'static str],
    pub workflow_configured: bool,
}

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// Service descriptor for the root path.
pub async fn describe(State(state): State<AppState>) -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        ok: true,
        service: SERVICE_NAME,
        endpoints: ENDPOINTS,
        workflow_configured: !state.config.upstream.workflow_id.is_empty(),
    })
}

/// Mint a fresh session token.
pub async fn session_start(State(state): State<AppState>) -> Response {
    issue(&state, "start").await
}

/// Renewal request body. Some clients send their current secret; it is
/// acknowledged and ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest {
    #[serde(default)]
    current_client_secret: Option<String>,
}

/// Renew a session by minting a new token.
pub async fn session_refresh(State(state): State<AppState>, body: Bytes) -> Response {
    if let Ok(request) = serde_json::from_slice::<RefreshRequest>(&body) {
        if request.current_client_secret.is_some() {
            // Presence only; the value must never hit the logs.
            tracing::debug!("Caller offered an existing client secret, minting a new one");
        }
    }
    issue(&state, "refresh").await
}

async fn issue(state: &AppState, endpoint: &'static str) -> Response {
    let start = Instant::now();
    let response = match state.upstream.issue_session().await {
        Ok(token) => (StatusCode::OK, Json(token)).into_response(),
        Err(err) => relay_error_response(&err),
    };
    metrics::record_session_request(endpoint, response.status().as_u16(), start);
    response
}
