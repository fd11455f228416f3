//! Common test utilities

use depot_admin::config::{Config, PolicyStoreConfig, RegistryConfig};
use depot_admin::server::{router, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use wiremock::MockServer;

/// A running application instance backed by mocked upstream services
pub struct TestApp {
    pub addr: SocketAddr,
    pub policy_store: MockServer,
    pub registry: MockServer,
}

impl TestApp {
    /// Spawn the app on an ephemeral port with wiremock upstreams
    pub async fn spawn() -> Self {
        let policy_store = MockServer::start().await;
        let registry = MockServer::start().await;

        let config = Config {
            http_host: "127.0.0.1".to_string(),
            http_port: 0,
            policy_store: PolicyStoreConfig {
                url: policy_store.uri(),
                service_token: "test-token".to_string(),
                timeout_secs: 5,
            },
            registry: RegistryConfig {
                url: registry.uri(),
                service_token: "test-token".to_string(),
                timeout_secs: 5,
            },
        };

        let app = router(AppState::new(config));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server crashed");
        });

        Self {
            addr,
            policy_store,
            registry,
        }
    }

    pub fn api_url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn http_client(&self) -> reqwest::Client {
        reqwest::Client::new()
    }
}
