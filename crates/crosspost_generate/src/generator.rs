//! Text generation seam.

use crate::GenerationKind;
use async_trait::async_trait;
use crosspost_error::{GenerateError, GenerateErrorKind};
use tracing::{debug, instrument};

/// Something that turns a prompt into text.
///
/// Implemented by [`GeminiGenerator`](crate::GeminiGenerator); tests and
/// alternative providers implement it directly.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a fully expanded prompt.
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;

    /// Model identifier, for logs and status reporting.
    fn model_name(&self) -> &str;
}

/// Draft text of the given kind about `subject`.
///
/// Rejects a blank subject before calling the provider and treats a blank
/// reply as [`GenerateErrorKind::EmptyResponse`]. The returned text is trimmed.
#[instrument(skip(generator, subject), fields(model = generator.model_name(), kind = %kind))]
pub async fn generate_content(
    generator: &dyn TextGenerator,
    kind: GenerationKind,
    subject: &str,
) -> Result<String, GenerateError> {
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(GenerateError::new(GenerateErrorKind::EmptyPrompt));
    }

    let text = generator.generate(&kind.prompt(subject)).await?;
    let text = text.trim();
    if text.is_empty() {
        return Err(GenerateError::new(GenerateErrorKind::EmptyResponse));
    }

    debug!(chars = text.len(), "Generated content");
    Ok(text.to_string())
}
