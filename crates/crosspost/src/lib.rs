//! Crosspost - publish one piece of content to many social platforms.
//!
//! Crosspost validates which platforms accept a video, a photo set or a text
//! post, sends the content to the Upload-Post publishing API in one request,
//! and reports the outcome per platform, including partial failure.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use crosspost::{ClientConfig, MediaRef, Platform, UploadClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UploadClient::new(ClientConfig::from_env()?)?;
//!
//!     let result = client
//!         .upload_video(
//!             MediaRef::parse("launch.mp4"),
//!             "Launch day",
//!             "brand-account",
//!             [Platform::TikTok, Platform::YouTube],
//!         )
//!         .await?;
//!
//!     println!("{}", result.status());
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `server` - Re-export the web API as [`server`]
//! - `observability` - OpenTelemetry span export through `tracing`
//!
//! # Architecture
//!
//! - `crosspost_core` - Content kinds, platforms, media references, requests
//! - `crosspost_error` - Error types
//! - `crosspost_client` - Validation, payload building, transport, results
//! - `crosspost_generate` - Optional AI caption and description drafting
//! - `crosspost_server` - Web API
//!
//! This crate re-exports everything for convenience and ships the
//! `crosspost` command-line tool.

// Re-export core crates (always available)
pub use crosspost_client::*;
pub use crosspost_core::*;
pub use crosspost_error::*;
pub use crosspost_generate::*;

// Re-export optional crates based on features
#[cfg(feature = "server")]
pub use crosspost_server as server;

pub mod cli;

// OpenTelemetry observability module
#[cfg(feature = "observability")]
pub mod observability;
