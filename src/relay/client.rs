//! Upstream session-issuance client.
//!
//! # Responsibilities
//! - Hold the shared reqwest client (connection pool, timeout)
//! - Attach the credential and feature-negotiation headers
//! - Normalize the response at the parse boundary
//! - Classify failures into the relay error taxonomy

use std::time::Duration;

use uuid::Uuid;

use crate::config::schema::UpstreamConfig;
use crate::relay::error::{RelayError, RelayResult};
use crate::relay::types::{SessionCreated, SessionRequest, SessionToken, WorkflowRef};

/// Value of the feature-negotiation header required by the sessions API.
const CHATKIT_BETA: &str = "chatkit_beta=v1";

/// Client for the upstream session-issuance endpoint.
///
/// Cheap to share: one instance lives in the application state and serves
/// all inbound requests concurrently. It holds no mutable state.
pub struct UpstreamClient {
    http: reqwest::Client,
    config: UpstreamConfig,
    sessions_url: String,
}

impl UpstreamClient {
    /// Build the client. The timeout covers the whole outbound call,
    /// connect through body.
    pub fn new(config: UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let sessions_url = format!("{}/sessions", config.api_base.trim_end_matches('/'));

        Ok(Self {
            http,
            config,
            sessions_url,
        })
    }

    /// Mint a brand-new session bound to a fresh anonymous user.
    ///
    /// Renewal goes through here too: the relay never calls an upstream
    /// refresh endpoint, it just issues again. One code path, one set of
    /// failure modes.
    pub async fn issue_session(&self) -> RelayResult<SessionToken> {
        let user = anonymous_user_id();

        let body = SessionRequest {
            workflow: WorkflowRef {
                id: &self.config.workflow_id,
            },
            user: &user,
            expires_in_seconds: self.config.session_ttl_secs,
        };

        let mut request = self
            .http
            .post(&self.sessions_url)
            .bearer_auth(&self.config.api_key)
            .header("OpenAI-Beta", CHATKIT_BETA)
            .json(&body);
        if let Some(project) = &self.config.project {
            request = request.header("OpenAI-Project", project);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = read_error_body(response).await;
            tracing::warn!(
                status = status.as_u16(),
                user = %user,
                "Upstream rejected session request"
            );
            return Err(RelayError::UpstreamRejected {
                status: status.as_u16(),
                body: error_body,
            });
        }

        let created: SessionCreated = response.json().await.map_err(|e| self.transport_error(e))?;
        let token = created.into_token();
        if token.client_secret.is_empty() {
            return Err(RelayError::Decode(
                "upstream returned an empty client secret".to_string(),
            ));
        }

        tracing::debug!(
            user = %user,
            expires_at = ?token.expires_at,
            "Session issued"
        );
        Ok(token)
    }

    /// Map a reqwest failure onto the relay taxonomy. The error text never
    /// contains the credential (reqwest does not echo request headers).
    fn transport_error(&self, err: reqwest::Error) -> RelayError {
        let mapped = if err.is_timeout() {
            RelayError::Timeout(self.config.timeout_secs)
        } else if err.is_connect() {
            RelayError::Connect(err.to_string())
        } else if err.is_decode() {
            RelayError::Decode(err.to_string())
        } else {
            RelayError::Connect(err.to_string())
        };
        tracing::warn!(error = %mapped, "Upstream call failed");
        mapped
    }
}

/// Generate the anonymous user reference for one session.
///
/// A v4 uuid carries 122 random bits, so two calls never collide in
/// practice and the upstream sees a distinct user per issued session.
pub fn anonymous_user_id() -> String {
    format!("user_{}", Uuid::new_v4().simple())
}

/// Read a failure body, keeping JSON structured when it parses.
async fn read_error_body(response: reqwest::Response) -> serde_json::Value {
    match response.text().await {
        Ok(text) => {
            serde_json::from_str(&text).unwrap_or_else(|_| serde_json::Value::String(text))
        }
        Err(e) => serde_json::Value::String(format!("<unreadable body: {}>", e)),
    }
}
