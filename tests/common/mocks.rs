#![allow(dead_code)]

use async_trait::async_trait;
use nano_studio::{
    Error, Result,
    provider::{GenerationRequest, ImageProvider, ProviderOutput},
    session::{GenerateBackend, PreviewHandle, PreviewStore},
};
use std::sync::{Arc, Mutex};

/// Scripted provider for server tests
pub struct MockProvider {
    pub outputs: Arc<Mutex<Vec<ProviderOutput>>>,
    pub requests: Arc<Mutex<Vec<GenerationRequest>>>,
    pub error: Option<String>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            outputs: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_output(self, output: ProviderOutput) -> Self {
        self.outputs.lock().unwrap().push(output);
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageProvider for MockProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<ProviderOutput> {
        self.requests.lock().unwrap().push(request.clone());

        if let Some(ref error) = self.error {
            return Err(Error::provider(error.clone()));
        }

        let mut outputs = self.outputs.lock().unwrap();
        if outputs.is_empty() {
            return Err(Error::provider("No more mock outputs available"));
        }

        Ok(outputs.remove(0))
    }
}

/// Scripted backend for session controller tests
pub struct MockBackend {
    pub results: Arc<Mutex<Vec<Result<Vec<String>>>>>,
    pub requests: Arc<Mutex<Vec<GenerationRequest>>>,
    pub image_bytes: Option<Vec<u8>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            image_bytes: None,
        }
    }

    pub fn with_result(self, result: Result<Vec<String>>) -> Self {
        self.results.lock().unwrap().push(result);
        self
    }

    pub fn with_image_bytes(mut self, bytes: Vec<u8>) -> Self {
        self.image_bytes = Some(bytes);
        self
    }

    pub fn get_requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerateBackend for MockBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<String>> {
        self.requests.lock().unwrap().push(request.clone());

        let mut results = self.results.lock().unwrap();
        if results.is_empty() {
            return Err(Error::provider("No more mock results available"));
        }

        results.remove(0)
    }

    async fn fetch_image(&self, _url: &str) -> Result<Vec<u8>> {
        match &self.image_bytes {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(Error::download("Failed to download image: 404 Not Found")),
        }
    }
}

/// Preview store that records every allocation and revocation. Revoking
/// the same handle twice panics, pinning the release-exactly-once
/// discipline.
#[derive(Default)]
pub struct MockPreviewStore {
    pub created: Arc<Mutex<Vec<PreviewHandle>>>,
    pub revoked: Arc<Mutex<Vec<PreviewHandle>>>,
}

impl MockPreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created_handles(&self) -> Vec<PreviewHandle> {
        self.created.lock().unwrap().clone()
    }

    pub fn revoked_handles(&self) -> Vec<PreviewHandle> {
        self.revoked.lock().unwrap().clone()
    }
}

impl PreviewStore for MockPreviewStore {
    fn create(&self, bytes: &[u8]) -> PreviewHandle {
        let handle = PreviewHandle::local(format!("blob:len-{}", bytes.len()));
        self.created.lock().unwrap().push(handle.clone());
        handle
    }

    fn revoke(&self, handle: &PreviewHandle) {
        let mut revoked = self.revoked.lock().unwrap();
        assert!(
            !revoked.iter().any(|h| h.id() == handle.id()),
            "preview handle {} revoked twice",
            handle.id()
        );
        revoked.push(handle.clone());
    }
}

/// Preview store whose handles reference permanent assets; revoking one is
/// a test failure.
#[derive(Default)]
pub struct RemotePreviewStore;

impl PreviewStore for RemotePreviewStore {
    fn create(&self, _bytes: &[u8]) -> PreviewHandle {
        PreviewHandle::remote("https://assets.example/placeholder.png")
    }

    fn revoke(&self, handle: &PreviewHandle) {
        panic!("remote preview {} must never be revoked", handle.id());
    }
}
