//! Shared utilities for integration testing.

use chatkit_session_relay::config::{ListenerConfig, RelayConfig, UpstreamConfig};
use chatkit_session_relay::{HttpServer, Shutdown};
use tokio::net::TcpListener;

/// Credential held by the test relay. Tests assert it never leaks.
pub const TEST_API_KEY: &str = "sk-test-relay-credential";

/// Relay configuration pointed at a mock upstream.
pub fn test_config(api_base: &str) -> RelayConfig {
    RelayConfig {
        listener: ListenerConfig {
            bind_address: "127.0.0.1:0".to_string(),
            request_timeout_secs: 5,
        },
        upstream: UpstreamConfig {
            api_key: TEST_API_KEY.to_string(),
            workflow_id: "wf_test".to_string(),
            api_base: api_base.to_string(),
            project: None,
            timeout_secs: 2,
            session_ttl_secs: None,
        },
        ..RelayConfig::default()
    }
}

/// Spawn the relay on an ephemeral port.
///
/// Returns the base URL and the shutdown coordinator. Dropping the
/// coordinator closes the broadcast channel and stops the server.
pub async fn spawn_relay(config: RelayConfig) -> (String, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (format!("http://{}", addr), shutdown)
}
