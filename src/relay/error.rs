//! Session relay error definitions.
//!
//! One enum, two failure families: the upstream answered and said no
//! (pass its status through), or the upstream was never usefully reached
//! (surface as a 500-class transport error). Handlers map these onto HTTP
//! responses in `http::response`; nothing here panics.

use thiserror::Error;

/// Errors that can occur while relaying a session-issuance call.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Upstream returned a non-2xx status. Carries the parsed error payload
    /// (or the raw text when the body is not JSON).
    #[error("upstream rejected the session request with status {status}")]
    UpstreamRejected {
        status: u16,
        body: serde_json::Value,
    },

    /// Outbound call did not complete within the configured window.
    #[error("upstream request timed out after {0} seconds")]
    Timeout(u64),

    /// Connection-level failure: DNS, refused, reset.
    #[error("failed to reach upstream: {0}")]
    Connect(String),

    /// Upstream said 2xx but the body was not a usable session payload.
    #[error("upstream returned an unusable session response: {0}")]
    Decode(String),
}

impl RelayError {
    /// Short machine-readable tag used in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::UpstreamRejected { .. } => "UpstreamRejected",
            RelayError::Timeout(_) => "Timeout",
            RelayError::Connect(_) => "Connect",
            RelayError::Decode(_) => "Decode",
        }
    }
}

/// Result type for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = RelayError::Timeout(30);
        assert_eq!(err.to_string(), "upstream request timed out after 30 seconds");

        let err = RelayError::UpstreamRejected {
            status: 503,
            body: json!({"error": "overloaded"}),
        };
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(RelayError::Timeout(1).kind(), "Timeout");
        assert_eq!(RelayError::Connect("refused".into()).kind(), "Connect");
        assert_eq!(RelayError::Decode("bad json".into()).kind(), "Decode");
        assert_eq!(
            RelayError::UpstreamRejected { status: 401, body: serde_json::Value::Null }.kind(),
            "UpstreamRejected"
        );
    }

}
