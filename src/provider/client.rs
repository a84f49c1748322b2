use super::output::ProviderOutput;
use super::types::GenerationRequest;
use crate::{Error, Result, config::ProviderConfig};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

/// The hosted generation model, reduced to a single opaque call.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Invoke the model once and return its raw output shape.
    async fn generate(&self, request: &GenerationRequest) -> Result<ProviderOutput>;
}

/// Client for the synchronous predictions API: one POST with `Prefer: wait`,
/// one response carrying the finished prediction.
#[derive(Debug)]
pub struct ReplicateClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_token: String,
}

impl ReplicateClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_token = config.resolve_token()?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_token,
        })
    }

    /// The image-input parameter is only present when at least one
    /// attachment exists.
    fn build_input(request: &GenerationRequest) -> Value {
        let mut input = json!({ "prompt": request.prompt });
        if !request.images.is_empty() {
            input["image_input"] = Value::Array(
                request
                    .images
                    .iter()
                    .map(|image| Value::String(image.to_data_uri()))
                    .collect(),
            );
        }
        input
    }
}

#[async_trait]
impl ImageProvider for ReplicateClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<ProviderOutput> {
        let url = format!("{}/v1/models/{}/predictions", self.base_url, self.model);
        debug!(
            "Invoking model {} with {} reference image(s)",
            self.model,
            request.images.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .header("Prefer", "wait")
            .json(&json!({ "input": Self::build_input(request) }))
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if !status.is_success() {
            let detail = body
                .get("detail")
                .and_then(Value::as_str)
                .unwrap_or("prediction request was rejected");
            return Err(Error::provider(format!("{status}: {detail}")));
        }

        if body.get("status").and_then(Value::as_str) == Some("failed") {
            let reason = body
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("prediction failed");
            return Err(Error::provider(reason));
        }

        let output = body.get("output").cloned().unwrap_or(Value::Null);
        Ok(ProviderOutput::from(output))
    }
}
