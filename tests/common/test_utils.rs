#![allow(dead_code)]

use super::mocks::MockProvider;
use axum::{
    Router,
    body::Body,
    http::{Request, header::CONTENT_TYPE},
};
use nano_studio::server::{handlers::AppState, router};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

pub const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Build the application router around a scripted provider
pub fn create_test_app(provider: MockProvider) -> Router {
    create_test_app_with_limit(provider, 1000)
}

pub fn create_test_app_with_limit(provider: MockProvider, max_prompt_chars: usize) -> Router {
    let state = AppState {
        provider: Arc::new(provider),
        max_prompt_chars,
    };
    router(state)
}

/// Build a multipart POST request the way the browser form submits it:
/// an optional `prompt` text field plus repeated `images` file parts.
pub fn multipart_request(
    uri: &str,
    prompt: Option<&str>,
    images: &[(&str, &[u8])],
) -> Request<Body> {
    let mut body = Vec::new();

    if let Some(prompt) = prompt {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"prompt\"\r\n\r\n{prompt}\r\n"
            )
            .as_bytes(),
        );
    }

    for (file_name, bytes) in images {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"images\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Read a response body as JSON
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> String {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await.unwrap();
    config_path.to_string_lossy().to_string()
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
server:
  host: "127.0.0.1"
  port: 8080
  logs:
    level: "debug"

provider:
  base_url: "https://api.replicate.com"
  model: "google/nano-banana"
  api_token: "test-token"
  max_prompt_chars: 1000
"#;

/// Minimal configuration relying on every default
pub const MINIMAL_CONFIG_YAML: &str = r#"
provider:
  api_token: "test-token"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
server:
  port: "not-a-number"

provider: []
"#;
