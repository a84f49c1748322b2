use super::types::{ErrorResponse, GenerateResponse};
use crate::{
    Error, Result,
    provider::{GenerationRequest, ImageAttachment, ImageProvider, normalize},
};
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn ImageProvider>,
    pub max_prompt_chars: usize,
}

pub async fn generate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> std::result::Result<Json<GenerateResponse>, (StatusCode, Json<ErrorResponse>)> {
    match handle_generate(&state, multipart).await {
        Ok(image_urls) => {
            info!("Generation produced {} image URL(s)", image_urls.len());
            Ok(Json(GenerateResponse { image_urls }))
        }
        Err(e) => {
            error!("Generation request failed: {}", e);
            Err((
                e.status_code(),
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}

async fn handle_generate(state: &AppState, multipart: Multipart) -> Result<Vec<String>> {
    let request = read_form(multipart, state.max_prompt_chars).await?;

    let output = state.provider.generate(&request).await?;
    let image_urls = normalize(&output).await;

    if image_urls.is_empty() {
        return Err(Error::EmptyResult);
    }

    Ok(image_urls)
}

async fn read_form(mut multipart: Multipart, max_prompt_chars: usize) -> Result<GenerationRequest> {
    let mut prompt: Option<String> = None;
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("prompt") => prompt = Some(field.text().await?),
            Some("images") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await?;

                // Zero-sized file parts come from empty form inputs
                if !bytes.is_empty() {
                    images.push(ImageAttachment::new(file_name, content_type, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    let prompt = prompt.unwrap_or_default();
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(Error::validation("Prompt is required"));
    }
    if trimmed.chars().count() > max_prompt_chars {
        return Err(Error::validation(format!(
            "Prompt exceeds {max_prompt_chars} characters"
        )));
    }

    Ok(GenerationRequest::new(trimmed, images))
}
