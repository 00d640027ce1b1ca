//! Response construction for relay outcomes.
//!
//! # Responsibilities
//! - Map relay errors onto HTTP responses for the browser
//! - Preserve the upstream status code and body on rejection
//! - Collapse transport failures into a 500 with a diagnostic payload
//!
//! # Design Decisions
//! - Upstream rejections pass through verbatim so the frontend can react
//!   to 401/429/503 distinctly instead of seeing a uniform 502
//! - Error payloads carry operator-grade detail but never the credential

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::relay::RelayError;

/// Build the HTTP response for a failed upstream call.
pub fn relay_error_response(err: &RelayError) -> Response {
    match err {
        RelayError::UpstreamRejected { status, body } => {
            let status_code =
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            let payload = json!({
                "error": {
                    "status": status,
                    "body": body,
                    "note": "upstream rejected the session request",
                }
            });
            (status_code, Json(payload)).into_response()
        }
        transport => {
            let payload = json!({
                "error": {
                    "exception": transport.kind(),
                    "message": transport.to_string(),
                }
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}
