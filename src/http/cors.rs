//! Browser origin policy.
//!
//! # Responsibilities
//! - Build the CORS layer from the configured origin allowlist
//! - Answer OPTIONS requests for the session endpoints
//!
//! # Design Decisions
//! - The layer short-circuits every OPTIONS request, preflight or not, with
//!   a 200 and the policy headers; no OPTIONS route exists behind it
//! - An empty allowlist (or an entry of `*`) means wildcard, and wildcard
//!   is always combined with `allow_credentials(false)`; browsers reject
//!   the pair, and tower-http panics on it at request time
//! - An explicit allowlist echoes the matching origin and permits
//!   credentialed requests

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::config::CorsConfig;

/// Build the CORS layer for the session endpoints.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(config.max_age_secs));

    if config.is_wildcard() {
        return layer.allow_origin(Any).allow_credentials(false);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Skipping origin that is not a valid header value");
                None
            }
        })
        .collect();

    layer.allow_origin(origins).allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use tower::ServiceExt;

    fn app(config: &CorsConfig) -> Router {
        Router::new()
            .route("/session/start", post(|| async { "ok" }))
            .layer(cors_layer(config))
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/session/start")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_wildcard_never_advertises_credentials() {
        let config = CorsConfig {
            allowed_origins: vec![],
            max_age_secs: 3600,
        };
        let response = app(&config)
            .oneshot(preflight("https://anywhere.test"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .is_none());
    }

    #[tokio::test]
    async fn test_star_entry_collapses_to_wildcard() {
        let config = CorsConfig {
            allowed_origins: vec!["*".into()],
            max_age_secs: 3600,
        };
        let response = app(&config)
            .oneshot(preflight("https://anywhere.test"))
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .is_none());
    }

    #[tokio::test]
    async fn test_allowlist_echoes_origin_and_allows_credentials() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.example.com".into()],
            max_age_secs: 3600,
        };
        let response = app(&config)
            .oneshot(preflight("https://app.example.com"))
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "https://app.example.com"
        );
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_unlisted_origin_gets_no_allow_origin_header() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.example.com".into()],
            max_age_secs: 3600,
        };
        let response = app(&config)
            .oneshot(preflight("https://evil.example.com"))
            .await
            .unwrap();

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_preflight_advertises_methods_and_max_age() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.example.com".into()],
            max_age_secs: 600,
        };
        let response = app(&config)
            .oneshot(preflight("https://app.example.com"))
            .await
            .unwrap();

        let methods = response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(methods.contains("POST"));
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_MAX_AGE)
                .unwrap(),
            "600"
        );
    }
}
