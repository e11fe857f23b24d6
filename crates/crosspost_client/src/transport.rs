//! Transport seam between the orchestrator and the publishing API.

use crate::{ClientConfig, Payload, PayloadPart};
use async_trait::async_trait;
use crosspost_error::{ConfigError, TransportError, TransportErrorKind};
use derive_getters::Getters;
use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use tracing::{debug, error, instrument};

/// A 2xx response from the publishing API.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RawResponse {
    /// HTTP status code
    status: u16,
    /// Response body as text
    body: String,
}

impl RawResponse {
    /// Create a response record.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one payload as one authenticated request.
///
/// Implementations perform no retries; a single call either yields the 2xx
/// response or a [`TransportError`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `payload` and return the raw 2xx response.
    async fn send(&self, payload: &Payload) -> Result<RawResponse, TransportError>;
}

/// reqwest-backed transport for the Upload-Post API.
///
/// Holds only the immutable credential, base URL and a pooled HTTP client,
/// so a single instance serves concurrent uploads without locking.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Build a transport, rejecting a missing credential or malformed endpoint.
    #[instrument(skip(config), fields(base_url = %config.base_url))]
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("crosspost/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Created HTTP transport");
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn build_form(payload: &Payload) -> Result<Form, TransportError> {
        let mut form = Form::new();
        for part in payload.parts() {
            form = match part {
                PayloadPart::Text { name, value } => form.text(name.clone(), value.clone()),
                PayloadPart::File {
                    name,
                    path,
                    file_name,
                    mime,
                } => {
                    let data = tokio::fs::read(path).await.map_err(|e| {
                        TransportError::new(TransportErrorKind::Encode(format!(
                            "Failed to read {}: {}",
                            path.display(),
                            e
                        )))
                    })?;
                    let file_part = Part::bytes(data)
                        .file_name(file_name.clone())
                        .mime_str(mime)
                        .map_err(|e| {
                            TransportError::new(TransportErrorKind::Encode(format!(
                                "Invalid MIME type {}: {}",
                                mime, e
                            )))
                        })?;
                    form.part(name.clone(), file_part)
                }
            };
        }
        Ok(form)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, payload), fields(endpoint = payload.endpoint(), platforms = payload.platforms().len()))]
    async fn send(&self, payload: &Payload) -> Result<RawResponse, TransportError> {
        let url = format!("{}/{}", self.base_url, payload.endpoint());
        debug!("Sending upload request to {}", url);

        let form = Self::build_form(payload).await?;

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Apikey {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Request failed: {}", e);
                TransportError::new(TransportErrorKind::Network(e.to_string()))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read response body: {}", e);
            TransportError::new(TransportErrorKind::Network(format!(
                "Failed to read response body: {}",
                e
            )))
        })?;

        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            error!(status = status.as_u16(), "Publishing API rejected the credential");
            return Err(TransportError::new(TransportErrorKind::Auth(body)));
        }

        if !status.is_success() {
            error!(status = status.as_u16(), "Publishing API returned an error");
            return Err(TransportError::new(TransportErrorKind::Upstream {
                status_code: status.as_u16(),
                body,
            }));
        }

        debug!(status = status.as_u16(), "Upload request accepted");
        Ok(RawResponse::new(status.as_u16(), body))
    }
}
