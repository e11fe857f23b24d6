use crate::{
    ClientConfig, FailureReason, HttpTransport, PayloadBuilder, Transport, UploadResult,
    UploadStatus, validate,
};
use crosspost_core::{ContentKind, MediaRef, Platform, UploadRequest};
use crosspost_error::{BuildError, CrosspostResult};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Public entry point for distributing content.
///
/// Composes validation, payload building and the transport into one
/// request/response cycle per call. No retries, no queueing, no state shared
/// between calls: clone it or wrap it in an `Arc` and call it concurrently.
#[derive(Clone)]
pub struct UploadClient {
    transport: Arc<dyn Transport>,
    builder: PayloadBuilder,
}

impl std::fmt::Debug for UploadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadClient").finish_non_exhaustive()
    }
}

impl UploadClient {
    /// Create a client talking to the publishing API over HTTP.
    ///
    /// Fails with a configuration error when the credential is missing or the
    /// endpoint is malformed; no request is attempted in that case.
    pub fn new(config: ClientConfig) -> CrosspostResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(transport))
    }

    /// Create a client over any transport.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::with_shared_transport(Arc::new(transport))
    }

    /// Create a client over a transport shared with other owners.
    pub fn with_shared_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            builder: PayloadBuilder::new(),
        }
    }

    /// Run the full pipeline for a prepared request.
    ///
    /// Validation and build errors are returned as `Err` before any network
    /// call. Transport failures come back as `Ok` with
    /// [`UploadStatus::Failure`].
    #[instrument(
        skip(self, request),
        fields(kind = %request.kind(), user = %request.user(), platforms = request.platforms().len())
    )]
    pub async fn upload(&self, request: &UploadRequest) -> CrosspostResult<UploadResult> {
        validate(*request.kind(), request.platforms()).inspect_err(|e| {
            warn!(error = %e, "Rejected platform selection");
        })?;

        let payload = self.builder.build(request).inspect_err(|e| {
            warn!(error = %e, "Could not build upload payload");
        })?;
        debug!(endpoint = payload.endpoint(), parts = payload.parts().len(), "Built payload");

        let result = match self.transport.send(&payload).await {
            Ok(response) => UploadResult::from_response(&response, payload.platforms()),
            Err(err) => {
                error!(error = %err, "Upload request failed");
                UploadResult::failed(FailureReason::Transport(err))
            }
        };

        match result.status() {
            UploadStatus::Success => info!("Upload succeeded"),
            UploadStatus::PartialFailure => warn!(
                failed = ?result.failed_platforms(),
                "Upload succeeded on some platforms only"
            ),
            UploadStatus::Failure => warn!("Upload failed"),
        }
        Ok(result)
    }

    /// Upload one video to `platforms`.
    pub async fn upload_video(
        &self,
        video: impl Into<MediaRef>,
        title: impl Into<String>,
        user: impl Into<String>,
        platforms: impl IntoIterator<Item = Platform>,
    ) -> CrosspostResult<UploadResult> {
        let request = UploadRequest::builder()
            .kind(ContentKind::Video)
            .user(user)
            .title(title)
            .platforms(platforms.into_iter().collect::<BTreeSet<_>>())
            .media(vec![video.into()])
            .build()
            .map_err(BuildError::from)?;
        self.upload(&request).await
    }

    /// Upload one or more photos to `platforms`, with an optional caption.
    pub async fn upload_photos(
        &self,
        photos: impl IntoIterator<Item = MediaRef>,
        title: impl Into<String>,
        user: impl Into<String>,
        platforms: impl IntoIterator<Item = Platform>,
        caption: Option<String>,
    ) -> CrosspostResult<UploadResult> {
        let request = UploadRequest::builder()
            .kind(ContentKind::Photos)
            .user(user)
            .title(title)
            .platforms(platforms.into_iter().collect::<BTreeSet<_>>())
            .media(photos.into_iter().collect::<Vec<_>>())
            .caption(caption)
            .build()
            .map_err(BuildError::from)?;
        self.upload(&request).await
    }

    /// Publish a text post; `title` is the post body.
    pub async fn upload_text(
        &self,
        title: impl Into<String>,
        user: impl Into<String>,
        platforms: impl IntoIterator<Item = Platform>,
    ) -> CrosspostResult<UploadResult> {
        let request = UploadRequest::builder()
            .kind(ContentKind::Text)
            .user(user)
            .title(title)
            .platforms(platforms.into_iter().collect::<BTreeSet<_>>())
            .build()
            .map_err(BuildError::from)?;
        self.upload(&request).await
    }
}
