//! Transport errors raised while talking to the publishing API.

/// Transport failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TransportErrorKind {
    /// Credential rejected by the publishing API
    #[display("Authentication failed: {}", _0)]
    Auth(String),
    /// Connection, timeout or body read failure
    #[display("Network error: {}", _0)]
    Network(String),
    /// Non-2xx response
    #[display("Upstream returned HTTP {}: {}", status_code, body)]
    Upstream {
        /// HTTP status code
        status_code: u16,
        /// Response body as received
        body: String,
    },
    /// Local media could not be read or encoded
    #[display("Failed to encode request: {}", _0)]
    Encode(String),
}

impl TransportErrorKind {
    /// HTTP status code returned by the upstream, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportErrorKind::Upstream { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Whether the publishing API itself refused the request.
    ///
    /// Credential failures and 4xx responses are rejections; network
    /// failures, 5xx responses and local encoding failures are not.
    pub fn is_rejection(&self) -> bool {
        match self {
            TransportErrorKind::Auth(_) => true,
            TransportErrorKind::Upstream { status_code, .. } => (400..500).contains(status_code),
            TransportErrorKind::Network(_) | TransportErrorKind::Encode(_) => false,
        }
    }
}

/// Transport error with source location tracking.
///
/// # Examples
///
/// ```
/// use crosspost_error::{TransportError, TransportErrorKind};
///
/// let err = TransportError::new(TransportErrorKind::Upstream {
///     status_code: 422,
///     body: "{\"error\":\"bad user\"}".to_string(),
/// });
/// assert_eq!(err.kind.status_code(), Some(422));
/// assert!(err.kind.is_rejection());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Transport Error: {} at line {} in {}", kind, line, file)]
pub struct TransportError {
    /// The kind of error that occurred
    pub kind: TransportErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl TransportError {
    /// Create a new TransportError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TransportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
