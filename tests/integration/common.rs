//! Shared helpers for the integration suite.

use std::sync::Once;
use std::time::Duration;

use abax_sdk::client::RetryConfig;
use abax_sdk::{AbaxClient, ClientConfig, Credential};
use wiremock::MockServer;

static TRACING: Once = Once::new();

/// Route `tracing` output to the test writer. Filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Start a mock ABAX API.
pub async fn mock_api() -> MockServer {
    init_tracing();
    MockServer::start().await
}

/// Client configuration pointing at `server`. Rate-limit waits are capped
/// so a missing reset header does not stall the suite until the next minute.
pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .with_base_url(server.uri())
        .with_retry(RetryConfig::default().with_max_reset_wait(Duration::from_millis(10)))
        .build()
}

/// Client for `server` authenticated with a static API key.
pub fn client(server: &MockServer) -> AbaxClient {
    client_with(server, Credential::api_key("test-api-key"))
}

pub fn client_with(server: &MockServer, credential: Credential) -> AbaxClient {
    AbaxClient::with_config(config(server), credential).expect("client should build")
}

pub fn vehicle(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "commercialClass": "Company",
        "organization": { "id": "org-1", "name": "Fleet AS" },
        "fuelType": "Electricity"
    })
}

pub fn vehicle_page(page: u32, page_size: u32, ids: &[String]) -> serde_json::Value {
    serde_json::json!({
        "page": page,
        "pageSize": page_size,
        "items": ids.iter().map(|id| vehicle(id)).collect::<Vec<_>>()
    })
}
