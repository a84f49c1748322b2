use crate::server::types::{ErrorResponse, GenerateResponse};
use crate::{Error, Result, provider::GenerationRequest};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

/// The session's view of the generation service.
#[async_trait]
pub trait GenerateBackend: Send + Sync {
    /// Submit one generation request, returning the flat image URL list.
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>>;

    /// Fetch a result image's bytes for saving.
    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>>;
}

/// HTTP implementation talking to the `/api/generate` endpoint.
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl GenerateBackend for HttpBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>> {
        let mut form = Form::new().text("prompt", request.prompt.clone());
        for image in &request.images {
            let part = Part::bytes(image.bytes.clone())
                .file_name(image.file_name.clone())
                .mime_str(&image.content_type)?;
            form = form.part("images", part);
        }

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "Generation request failed.".to_string());
            return Err(Error::provider(message));
        }

        let payload: GenerateResponse = response.json().await?;
        if payload.image_urls.is_empty() {
            return Err(Error::EmptyResult);
        }

        Ok(payload.image_urls)
    }

    async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::download(format!(
                "Failed to download image: {}",
                response.status()
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }
}
