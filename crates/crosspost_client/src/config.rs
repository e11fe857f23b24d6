//! Client configuration and credential resolution.
//!
//! Configuration is layered, lowest precedence first:
//! - Bundled defaults (include_str! from crosspost.toml)
//! - `~/.config/crosspost/crosspost.toml`
//! - `./crosspost.toml`
//! - `CROSSPOST__SECTION__KEY` environment variables

use config::{Config, Environment, File, FileFormat};
use crosspost_error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default publishing API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.upload-post.com/api";

/// Environment variable holding the publishing API key.
pub const API_KEY_ENV: &str = "UPLOAD_POST_API_KEY";

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Build the layered configuration shared by every Crosspost binary.
pub fn layered_config() -> Result<Config, ConfigError> {
    debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

    const DEFAULT_CONFIG: &str = include_str!("../../../crosspost.toml");

    let mut builder = Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config/crosspost/crosspost.toml");
        builder = builder.add_source(File::from(home_config).required(false));
    }

    builder = builder
        .add_source(File::with_name("crosspost").required(false))
        .add_source(
            Environment::with_prefix("CROSSPOST")
                .separator("__")
                .try_parsing(true),
        );

    builder
        .build()
        .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))
}

/// The `[upload]` section of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadSettings {
    /// Publishing API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Inline API key (discouraged; prefer the key file or environment)
    #[serde(default)]
    pub api_key: Option<String>,
    /// File holding the API key, optionally as `UPLOAD_POST_API_KEY=<key>`
    #[serde(default)]
    pub api_key_file: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
            api_key_file: None,
        }
    }
}

impl UploadSettings {
    /// Read the `[upload]` section from the layered configuration.
    pub fn load() -> Result<Self, ConfigError> {
        layered_config()?
            .get::<UploadSettings>("upload")
            .map_err(|e| ConfigError::new(format!("Failed to parse [upload] configuration: {}", e)))
    }

    /// Resolve the API key.
    ///
    /// Order: `explicit`, inline `api_key`, `api_key_file`, then the
    /// `UPLOAD_POST_API_KEY` environment variable.
    pub fn resolve_api_key(&self, explicit: Option<&str>) -> Result<String, ConfigError> {
        if let Some(key) = explicit.map(normalize_api_key).filter(|k| !k.is_empty()) {
            debug!("Using API key supplied by caller");
            return Ok(key);
        }
        if let Some(key) = self
            .api_key
            .as_deref()
            .map(normalize_api_key)
            .filter(|k| !k.is_empty())
        {
            debug!("Using API key from configuration");
            return Ok(key);
        }
        if let Some(path) = self.api_key_file.as_deref().filter(|p| p.exists()) {
            debug!(path = %path.display(), "Using API key from key file");
            return read_api_key_file(path);
        }
        std::env::var(API_KEY_ENV)
            .ok()
            .map(|raw| normalize_api_key(&raw))
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::new(format!("{} not set", API_KEY_ENV)))
    }
}

/// Read an API key file, stripping an optional `UPLOAD_POST_API_KEY=` prefix.
pub fn read_api_key_file(path: &Path) -> Result<String, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::new(format!(
            "Failed to read API key file {}: {}",
            path.display(),
            e
        ))
    })?;
    let key = normalize_api_key(&contents);
    if key.is_empty() {
        return Err(ConfigError::new(format!(
            "API key file {} is empty",
            path.display()
        )));
    }
    Ok(key)
}

fn normalize_api_key(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("UPLOAD_POST_API_KEY=")
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// Connection settings for the publishing API.
///
/// Held immutably by the transport once a client is built.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Base URL of the publishing API (e.g., "https://api.upload-post.com/api")
    pub base_url: String,
    /// Timeout applied to each request
    pub timeout: Duration,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    /// Create a configuration for the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create config from environment variables
    ///
    /// Reads:
    /// - `UPLOAD_POST_API_KEY` (required)
    /// - `UPLOAD_POST_BASE_URL` (default: "https://api.upload-post.com/api")
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = UploadSettings::default().resolve_api_key(None)?;
        let base_url =
            std::env::var("UPLOAD_POST_BASE_URL").unwrap_or_else(|_| default_base_url());
        Ok(Self::new(api_key).with_base_url(base_url))
    }

    /// Build from loaded settings, preferring an explicitly supplied key.
    pub fn from_settings(
        settings: &UploadSettings,
        explicit_key: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let api_key = settings.resolve_api_key(explicit_key)?;
        Ok(Self::new(api_key)
            .with_base_url(settings.base_url.clone())
            .with_timeout(Duration::from_secs(settings.timeout_secs)))
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check the credential and endpoint before any request is attempted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::new("API key is empty"));
        }
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            ConfigError::new(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::new(format!(
                "Base URL must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::new("Timeout must be greater than zero"));
        }
        Ok(())
    }
}
