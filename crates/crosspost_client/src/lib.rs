//! Upload orchestration client for the Upload-Post publishing API.
//!
//! This crate turns one content item into one publishing request and reports
//! what happened on every platform.
//!
//! # Pipeline
//!
//! Every upload runs the same four steps:
//!
//! 1. [`validate`] checks the platform set against the content kind.
//! 2. [`PayloadBuilder`] checks media and title and assembles a [`Payload`].
//! 3. A [`Transport`] sends the payload ([`HttpTransport`] in production).
//! 4. The response becomes an [`UploadResult`]: success, partial failure or failure.
//!
//! Steps 1 and 2 fail fast with a typed error and never touch the network.
//! Step 3 failures are folded into an [`UploadResult`] with
//! [`UploadStatus::Failure`] rather than returned as errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use crosspost_client::{ClientConfig, UploadClient};
//! use crosspost_core::Platform;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UploadClient::new(ClientConfig::from_env()?)?;
//!
//!     let result = client
//!         .upload_text("Shipping today", "brand-account", [Platform::X, Platform::LinkedIn])
//!         .await?;
//!
//!     if result.is_partial() {
//!         for (platform, status) in result.platforms() {
//!             println!("{platform}: {status}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod payload;
mod result;
mod transport;
mod validator;

pub use client::UploadClient;
pub use config::{
    API_KEY_ENV, ClientConfig, DEFAULT_BASE_URL, UploadSettings, layered_config, read_api_key_file,
};
pub use payload::{Payload, PayloadBuilder, PayloadPart};
pub use result::{FailureReason, PlatformStatus, UploadResult, UploadStatus};
pub use transport::{HttpTransport, RawResponse, Transport};
pub use validator::validate;
