use super::backend::GenerateBackend;
use super::fsm::{SessionEvent, SessionState, SessionStateMachine};
use crate::{
    Error, Result,
    provider::{GenerationRequest, ImageAttachment},
};
use chrono::Local;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Handle to a displayable preview of an uploaded image. Local handles
/// reference a revocable, locally-allocated resource; remote ones point at
/// permanent assets and are never revoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    id: Uuid,
    url: String,
    local: bool,
}

impl PreviewHandle {
    pub fn local(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            local: true,
        }
    }

    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
            local: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_local(&self) -> bool {
        self.local
    }
}

/// Allocates and revokes preview resources (the blob-URL store in a
/// browser host).
pub trait PreviewStore: Send + Sync {
    fn create(&self, bytes: &[u8]) -> PreviewHandle;
    fn revoke(&self, handle: &PreviewHandle);
}

/// Snapshot taken at submission time, independent of whether the request
/// later succeeds. Exactly one instance is live at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationMetadata {
    pub prompt: String,
    pub timestamp: String,
    pub image_preview: Option<PreviewHandle>,
}

/// Owns all state for one generation session: the FSM, the single in-flight
/// slot, the displayed results, and the current preview handle with its
/// release discipline.
pub struct SessionController {
    fsm: SessionStateMachine,
    backend: Arc<dyn GenerateBackend>,
    previews: Arc<dyn PreviewStore>,
    metadata: Option<GenerationMetadata>,
    generated_images: Vec<String>,
    notification: Option<String>,
}

impl SessionController {
    pub fn new(backend: Arc<dyn GenerateBackend>, previews: Arc<dyn PreviewStore>) -> Self {
        Self {
            fsm: SessionStateMachine::new(),
            backend,
            previews,
            metadata: None,
            generated_images: Vec::new(),
            notification: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.fsm.current_state()
    }

    pub fn metadata(&self) -> Option<&GenerationMetadata> {
        self.metadata.as_ref()
    }

    pub fn generated_images(&self) -> &[String] {
        &self.generated_images
    }

    /// Takes the pending transient notification, if any.
    pub fn take_notification(&mut self) -> Option<String> {
        self.notification.take()
    }

    /// Runs one generation cycle. Rejected without a state change when the
    /// prompt is blank or another submission is still in flight.
    pub async fn submit(&mut self, prompt: &str, images: &[ImageAttachment]) -> Result<()> {
        if prompt.trim().is_empty() {
            return Err(Error::validation("Prompt is required"));
        }
        if self.fsm.is_in_flight() {
            return Err(Error::validation(
                "A generation request is already in flight",
            ));
        }

        self.fsm.transition(SessionEvent::Submit)?;
        self.publish_metadata(prompt, images);

        let request = GenerationRequest::new(prompt.trim(), images.to_vec());
        match self.backend.generate(&request).await {
            Ok(urls) => {
                self.generated_images = urls;
                self.fsm.transition(SessionEvent::Succeeded)
            }
            Err(e) => {
                self.generated_images.clear();
                self.notification = Some(e.to_string());
                self.fsm.transition(SessionEvent::Failed)
            }
        }
    }

    /// Fetches a result image's bytes for saving. Failures surface as a
    /// transient notification and leave the display state unchanged.
    pub async fn download_image(&mut self, url: &str) -> Result<Vec<u8>> {
        match self.backend.fetch_image(url).await {
            Ok(bytes) => Ok(bytes),
            Err(e) => {
                let error = match e {
                    Error::Download(_) => e,
                    other => Error::download(other.to_string()),
                };
                self.notification = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Releases the live preview resource; runs on session teardown.
    pub fn teardown(&mut self) {
        if let Some(handle) = self.metadata.take().and_then(|m| m.image_preview) {
            if handle.is_local() {
                debug!("Revoking preview {} on teardown", handle.id());
                self.previews.revoke(&handle);
            }
        }
    }

    fn publish_metadata(&mut self, prompt: &str, images: &[ImageAttachment]) {
        let image_preview = images.first().map(|image| self.previews.create(&image.bytes));
        let metadata = GenerationMetadata {
            prompt: prompt.to_string(),
            timestamp: Local::now().format("%m/%d/%Y, %H:%M:%S").to_string(),
            image_preview,
        };

        let previous = self.metadata.replace(metadata);
        self.release_superseded(previous);
    }

    /// Revokes the outgoing preview only after the new metadata is live,
    /// only when the handles differ, and only when the old one was locally
    /// allocated.
    fn release_superseded(&self, previous: Option<GenerationMetadata>) {
        let Some(old) = previous.and_then(|m| m.image_preview) else {
            return;
        };
        let current = self.metadata.as_ref().and_then(|m| m.image_preview.as_ref());
        if current.map(PreviewHandle::id) == Some(old.id()) {
            return;
        }
        if old.is_local() {
            debug!("Revoking superseded preview {}", old.id());
            self.previews.revoke(&old);
        }
    }
}
