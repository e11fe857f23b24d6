//! Generator configuration.

use crosspost_error::{GenerateError, GenerateErrorKind};
use derive_getters::Getters;

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Credential and model for the text generator.
#[derive(Clone, Getters)]
pub struct GenerateConfig {
    /// Gemini API key.
    api_key: String,
    /// Model name, e.g. `gemini-2.5-flash`.
    model: String,
}

impl std::fmt::Debug for GenerateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateConfig")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GenerateConfig {
    /// Create a configuration for the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Read the API key from `GEMINI_API_KEY`.
    ///
    /// A missing or blank variable is reported as
    /// [`GenerateErrorKind::MissingApiKey`].
    pub fn from_env() -> Result<Self, GenerateError> {
        std::env::var(GEMINI_API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .map(Self::new)
            .ok_or_else(|| GenerateError::new(GenerateErrorKind::MissingApiKey))
    }

    /// Use a different model. Blank names keep the current model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        if !model.trim().is_empty() {
            self.model = model.trim().to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_flash_model() {
        let config = GenerateConfig::new("key");
        assert_eq!(config.model(), DEFAULT_MODEL);
    }

    #[test]
    fn blank_model_is_ignored() {
        let config = GenerateConfig::new("key").with_model("  ");
        assert_eq!(config.model(), DEFAULT_MODEL);

        let config = config.with_model("gemini-2.5-pro");
        assert_eq!(config.model(), "gemini-2.5-pro");
    }

    #[test]
    fn debug_hides_key() {
        let rendered = format!("{:?}", GenerateConfig::new("secret-value"));
        assert!(!rendered.contains("secret-value"));
    }
}
