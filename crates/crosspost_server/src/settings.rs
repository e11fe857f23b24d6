//! Server settings from the layered configuration.

use crosspost_client::layered_config;
use crosspost_error::ConfigError;
use crosspost_generate::DEFAULT_MODEL;
use serde::Deserialize;
use std::path::PathBuf;

/// The `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSettings {
    /// Socket address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Directory for staging uploaded media
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// Largest accepted request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_bind() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_body_bytes() -> usize {
    16 * 1024 * 1024
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            upload_dir: default_upload_dir(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ServerSettings {
    /// Read the `[server]` section.
    pub fn load() -> Result<Self, ConfigError> {
        layered_config()?
            .get::<ServerSettings>("server")
            .map_err(|e| ConfigError::new(format!("Failed to parse [server] configuration: {}", e)))
    }
}

/// The `[generate]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateSettings {
    /// Gemini model name
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
        }
    }
}

impl GenerateSettings {
    /// Read the `[generate]` section.
    pub fn load() -> Result<Self, ConfigError> {
        layered_config()?
            .get::<GenerateSettings>("generate")
            .map_err(|e| {
                ConfigError::new(format!("Failed to parse [generate] configuration: {}", e))
            })
    }
}
