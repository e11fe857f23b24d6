//! Top-level error wrapper types.

use crate::{BuildError, ConfigError, GenerateError, TransportError, ValidationError};

/// Every error family raised by the Crosspost crates.
///
/// # Examples
///
/// ```
/// use crosspost_error::{CrosspostError, CrosspostErrorKind, TransportError, TransportErrorKind};
///
/// let err: CrosspostError = TransportError::new(TransportErrorKind::Network("timed out".into())).into();
/// assert!(matches!(err.kind(), CrosspostErrorKind::Transport(_)));
/// assert!(format!("{}", err).contains("Network error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum CrosspostErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Platform selection rejected
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Payload could not be built
    #[from(BuildError)]
    Build(BuildError),
    /// Publishing API transport failure
    #[from(TransportError)]
    Transport(TransportError),
    /// Text generation failure
    #[from(GenerateError)]
    Generate(GenerateError),
}

/// Crosspost error with kind discrimination.
///
/// # Examples
///
/// ```
/// use crosspost_error::{CrosspostResult, ConfigError};
///
/// fn might_fail() -> CrosspostResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(!might_fail().unwrap_err().is_input_error());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Crosspost Error: {}", _0)]
pub struct CrosspostError(Box<CrosspostErrorKind>);

impl CrosspostError {
    /// Create a new error from a kind.
    pub fn new(kind: CrosspostErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &CrosspostErrorKind {
        &self.0
    }

    /// Whether the caller can fix this by correcting its input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self.kind(),
            CrosspostErrorKind::Validation(_) | CrosspostErrorKind::Build(_)
        )
    }
}

// Generic From implementation for any type that converts to CrosspostErrorKind
impl<T> From<T> for CrosspostError
where
    T: Into<CrosspostErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Crosspost operations.
pub type CrosspostResult<T> = std::result::Result<T, CrosspostError>;
