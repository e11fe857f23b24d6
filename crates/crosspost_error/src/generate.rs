//! Text generation error types.

/// Text generation failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerateErrorKind {
    /// API key not configured
    #[display("GEMINI_API_KEY environment variable not set")]
    MissingApiKey,
    /// Failed to create the provider client
    #[display("Failed to create Gemini client: {}", _0)]
    ClientCreation(String),
    /// Prompt was empty
    #[display("No prompt provided")]
    EmptyPrompt,
    /// API request failed
    #[display("Gemini API request failed: {}", _0)]
    ApiRequest(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Provider answered without any text
    #[display("Model returned an empty response")]
    EmptyResponse,
}

/// Text generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use crosspost_error::{GenerateError, GenerateErrorKind};
///
/// let err = GenerateError::new(GenerateErrorKind::MissingApiKey);
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generate Error: {} at line {} in {}", kind, line, file)]
pub struct GenerateError {
    /// The kind of error that occurred
    pub kind: GenerateErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerateError {
    /// Create a new GenerateError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerateErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
