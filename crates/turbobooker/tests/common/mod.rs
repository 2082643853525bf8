//! Common test utilities and helpers

use std::path::Path;

use turbobooker::{Config, Credentials};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Token handed out by [`mount_auth`]
#[allow(dead_code)]
pub const TEST_TOKEN: &str = "abc123";

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Configuration pointing at a mock server
#[allow(dead_code)]
pub fn test_config(server: &MockServer) -> Config {
    Config::new(server.uri(), Credentials::new("admin", "password123"))
}

/// Accept the test credentials on `POST /auth`
#[allow(dead_code)]
pub async fn mount_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth"))
        .and(body_json(serde_json::json!({
            "username": "admin",
            "password": "password123"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"token": TEST_TOKEN})),
        )
        .mount(server)
        .await;
}

/// Answer `GET /booking` with the given fixture
#[allow(dead_code)]
pub async fn mount_booking_ids(server: &MockServer, fixture: &str) {
    Mock::given(method("GET"))
        .and(path("/booking"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string(load_response_fixture(fixture)),
        )
        .mount(server)
        .await;
}
