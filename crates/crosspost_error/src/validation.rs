//! Platform eligibility errors.

use crosspost_core::{ContentKind, Platform};

/// Reasons a platform selection is rejected for a content kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// No platform was selected
    #[display("No platforms specified for {} upload", kind)]
    NoPlatforms {
        /// Content kind of the rejected request
        kind: ContentKind,
    },
    /// A selected platform does not accept this kind of content
    #[display("Platform '{}' does not accept {} content", platform, kind)]
    InvalidPlatform {
        /// Content kind of the rejected request
        kind: ContentKind,
        /// First offending platform
        platform: Platform,
    },
}

/// Validation error with source location tracking.
///
/// # Examples
///
/// ```
/// use crosspost_core::{ContentKind, Platform};
/// use crosspost_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::InvalidPlatform {
///     kind: ContentKind::Text,
///     platform: Platform::Instagram,
/// });
/// assert_eq!(err.platform(), Some(Platform::Instagram));
/// assert!(err.to_string().contains("instagram"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new ValidationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Content kind the request was validated against.
    pub fn content_kind(&self) -> ContentKind {
        match self.kind {
            ValidationErrorKind::NoPlatforms { kind }
            | ValidationErrorKind::InvalidPlatform { kind, .. } => kind,
        }
    }

    /// The offending platform, if one was named.
    pub fn platform(&self) -> Option<Platform> {
        match self.kind {
            ValidationErrorKind::InvalidPlatform { platform, .. } => Some(platform),
            ValidationErrorKind::NoPlatforms { .. } => None,
        }
    }
}
