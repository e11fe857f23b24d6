//! Shared handler state.

use crosspost_client::UploadClient;
use crosspost_generate::TextGenerator;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Capabilities available to the route handlers.
///
/// Either capability may be absent; the matching routes then answer 503
/// while the rest of the API keeps working.
#[derive(Clone)]
pub struct AppState {
    uploader: Option<Arc<UploadClient>>,
    generator: Option<Arc<dyn TextGenerator>>,
    upload_dir: Arc<PathBuf>,
    max_body_bytes: usize,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("upload_available", &self.uploader.is_some())
            .field("generate_available", &self.generator.is_some())
            .field("upload_dir", &self.upload_dir)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}

impl AppState {
    /// State with no capabilities, staging uploads in `upload_dir`.
    pub fn new(upload_dir: impl Into<PathBuf>, max_body_bytes: usize) -> Self {
        Self {
            uploader: None,
            generator: None,
            upload_dir: Arc::new(upload_dir.into()),
            max_body_bytes,
        }
    }

    /// Enable uploads.
    pub fn with_uploader(mut self, uploader: UploadClient) -> Self {
        self.uploader = Some(Arc::new(uploader));
        self
    }

    /// Enable text generation.
    pub fn with_generator(mut self, generator: impl TextGenerator + 'static) -> Self {
        self.generator = Some(Arc::new(generator));
        self
    }

    /// The upload client, if configured.
    pub fn uploader(&self) -> Option<&UploadClient> {
        self.uploader.as_deref()
    }

    /// The text generator, if configured.
    pub fn generator(&self) -> Option<&dyn TextGenerator> {
        self.generator.as_deref()
    }

    /// Directory where uploaded media is staged.
    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Largest accepted request body.
    pub fn max_body_bytes(&self) -> usize {
        self.max_body_bytes
    }
}
