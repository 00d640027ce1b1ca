//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Enforce mandatory secrets (credential, workflow id) before startup
//! - Validate value ranges and formats (timeouts > 0, addresses, URLs)
//! - Cross-field checks (inbound timeout must exceed the upstream timeout)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs once at startup; a failure here means the process refuses to start

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("upstream credential is missing (set OPENAI_API_KEY)")]
    MissingCredential,

    #[error("workflow id is missing (set CHATKIT_WORKFLOW_ID)")]
    MissingWorkflowId,

    #[error("upstream api_base '{0}' is not a valid http(s) URL")]
    InvalidApiBase(String),

    #[error("listener bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("metrics_address '{0}' is not a valid socket address")]
    InvalidMetricsAddress(String),

    #[error("upstream timeout_secs must be greater than zero")]
    ZeroUpstreamTimeout,

    #[error("listener request_timeout_secs ({0}) must be greater than upstream timeout_secs ({1})")]
    InboundTimeoutTooLow(u64, u64),

    #[error("allowed origin '{0}' is not a valid header value")]
    InvalidOrigin(String),
}

/// Check the whole configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.upstream.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingCredential);
    }
    if config.upstream.workflow_id.trim().is_empty() {
        errors.push(ValidationError::MissingWorkflowId);
    }

    match Url::parse(&config.upstream.api_base) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        _ => errors.push(ValidationError::InvalidApiBase(
            config.upstream.api_base.clone(),
        )),
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidMetricsAddress(addr.clone()));
        }
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroUpstreamTimeout);
    }

    // The inbound window must outlast the upstream call, otherwise the
    // timeout layer cuts the connection with a bare 408 before the relay
    // can report the structured transport error.
    if config.listener.request_timeout_secs <= config.upstream.timeout_secs {
        errors.push(ValidationError::InboundTimeoutTooLow(
            config.listener.request_timeout_secs,
            config.upstream.timeout_secs,
        ));
    }

    for origin in &config.cors.allowed_origins {
        if origin != "*" && HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::InvalidOrigin(origin.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
