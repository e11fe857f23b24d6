//! Google Gemini text generator.

use crate::{GenerateConfig, TextGenerator};
use async_trait::async_trait;
use crosspost_error::{GenerateError, GenerateErrorKind};
use gemini_rust::{Gemini, client::Model};
use tracing::{debug, error, instrument};

/// [`TextGenerator`] backed by the Gemini API.
pub struct GeminiGenerator {
    client: Gemini,
    model: String,
}

impl std::fmt::Debug for GeminiGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGenerator")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiGenerator {
    /// Create a generator for the configured model.
    #[instrument(skip(config), fields(model = %config.model()))]
    pub fn new(config: &GenerateConfig) -> Result<Self, GenerateError> {
        if config.api_key().trim().is_empty() {
            return Err(GenerateError::new(GenerateErrorKind::MissingApiKey));
        }

        let client = Gemini::with_model(config.api_key(), model_name_to_enum(config.model()))
            .map_err(|e| GenerateError::new(GenerateErrorKind::ClientCreation(e.to_string())))?;

        debug!("Created Gemini generator");
        Ok(Self {
            client,
            model: config.model().clone(),
        })
    }
}

/// Map a model name to the SDK's model enum.
///
/// - "gemini-2.5-flash" → Model::Gemini25Flash
/// - "gemini-2.0-flash" → Model::Custom("models/gemini-2.0-flash")
/// - "models/gemini-2.0-flash" is kept as-is
fn model_name_to_enum(name: &str) -> Model {
    match name {
        "gemini-2.5-flash" => Model::Gemini25Flash,
        "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
        "gemini-2.5-pro" => Model::Gemini25Pro,
        other if other.starts_with("models/") => Model::Custom(other.to_string()),
        other => Model::Custom(format!("models/{}", other)),
    }
}

/// Convert an SDK error, keeping the HTTP status when the message carries one.
///
/// SDK messages look like "bad response from server; code 503; description: ...".
fn parse_gemini_error(err: impl std::fmt::Display) -> GenerateError {
    let message = err.to_string();
    match extract_status_code(&message) {
        Some(status_code) => {
            GenerateError::new(GenerateErrorKind::HttpError { status_code, message })
        }
        None => GenerateError::new(GenerateErrorKind::ApiRequest(message)),
    }
}

fn extract_status_code(message: &str) -> Option<u16> {
    let start = message.find("code ")? + 5;
    let digits: String = message[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let response = self
            .client
            .generate_content()
            .with_user_message(prompt)
            .execute()
            .await
            .map_err(|e| {
                error!(error = %e, "Gemini request failed");
                parse_gemini_error(e)
            })?;
        Ok(response.text())
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_is_extracted() {
        assert_eq!(
            extract_status_code("bad response from server; code 503; description: overloaded"),
            Some(503)
        );
        assert_eq!(extract_status_code("code 429"), Some(429));
        assert_eq!(extract_status_code("connection reset"), None);
    }

    #[test]
    fn errors_keep_http_status() {
        let err = parse_gemini_error("bad response from server; code 400; description: bad key");
        assert!(matches!(
            err.kind,
            GenerateErrorKind::HttpError { status_code: 400, .. }
        ));

        let err = parse_gemini_error("dns failure");
        assert!(matches!(err.kind, GenerateErrorKind::ApiRequest(_)));
    }

    #[test]
    fn model_names_map_to_sdk_models() {
        assert!(matches!(model_name_to_enum("gemini-2.5-flash"), Model::Gemini25Flash));
        assert!(matches!(
            model_name_to_enum("gemini-2.0-flash"),
            Model::Custom(name) if name == "models/gemini-2.0-flash"
        ));
        assert!(matches!(
            model_name_to_enum("models/gemini-exp"),
            Model::Custom(name) if name == "models/gemini-exp"
        ));
    }

    #[test]
    fn blank_key_is_rejected() {
        let err = GeminiGenerator::new(&GenerateConfig::new(" ")).unwrap_err();
        assert_eq!(err.kind, GenerateErrorKind::MissingApiKey);
    }
}
