//! Payload construction errors.

/// Reasons a request cannot be turned into an outbound payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum BuildErrorKind {
    /// Video upload without a media item
    #[display("Video upload requires exactly one media item, none supplied")]
    MissingMedia,
    /// Video upload with more than one media item
    #[display("Video upload requires exactly one media item, {} supplied", _0)]
    TooManyMedia(usize),
    /// Media is neither a readable local file nor a well-formed URL
    #[display("Media '{}' is neither a readable file nor a valid URL", _0)]
    InvalidMediaType(String),
    /// Every photo was rejected
    #[display("No valid media among {} supplied item(s)", rejected)]
    NoValidMedia {
        /// Number of items that were dropped
        rejected: usize,
    },
    /// Title required for this content kind is empty
    #[display("Title is required")]
    MissingTitle,
    /// Request could not be assembled from its parts
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),
}

/// Build error with source location tracking.
///
/// # Examples
///
/// ```
/// use crosspost_error::{BuildError, BuildErrorKind};
///
/// let err = BuildError::new(BuildErrorKind::MissingMedia);
/// assert_eq!(err.kind(), &BuildErrorKind::MissingMedia);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Build Error: {} at line {} in {}", kind, line, file)]
pub struct BuildError {
    kind: BuildErrorKind,
    line: u32,
    file: &'static str,
}

impl BuildError {
    /// Create a new build error with caller location tracking.
    #[track_caller]
    pub fn new(kind: BuildErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BuildErrorKind {
        &self.kind
    }
}

impl From<crosspost_core::UploadRequestBuilderError> for BuildError {
    #[track_caller]
    fn from(err: crosspost_core::UploadRequestBuilderError) -> Self {
        Self::new(BuildErrorKind::InvalidRequest(err.to_string()))
    }
}
