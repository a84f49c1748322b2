use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// One uploaded reference image, as received at the form boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Inline data URI, the transport the predictions API accepts for file
    /// inputs.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            BASE64.encode(&self.bytes)
        )
    }
}

/// A single generation request: the prompt plus any reference images.
/// Constructed fresh per submission and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub images: Vec<ImageAttachment>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, images: Vec<ImageAttachment>) -> Self {
        Self {
            prompt: prompt.into(),
            images,
        }
    }
}
