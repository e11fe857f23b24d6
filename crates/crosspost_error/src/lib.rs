//! Error types for the Crosspost publishing client.
//!
//! This crate provides the error taxonomy used throughout the Crosspost workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! | Family | Raised when | Network call made? |
//! |---|---|---|
//! | [`ConfigError`] | credential or endpoint missing/invalid at construction | no |
//! | [`ValidationError`] | platform set empty or not allowed for the content kind | no |
//! | [`BuildError`] | media or title do not fit the content kind | no |
//! | [`TransportError`] | auth, network or non-2xx upstream response | yes |
//! | [`GenerateError`] | optional text generation failed | yes |
//!
//! # Examples
//!
//! ```
//! use crosspost_error::{CrosspostResult, ConfigError};
//!
//! fn load_key() -> CrosspostResult<String> {
//!     Err(ConfigError::new("UPLOAD_POST_API_KEY not set"))?
//! }
//!
//! match load_key() {
//!     Ok(key) => println!("Got: {}", key),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod build;
mod config;
mod error;
mod generate;
mod transport;
mod validation;

pub use build::{BuildError, BuildErrorKind};
pub use config::ConfigError;
pub use error::{CrosspostError, CrosspostErrorKind, CrosspostResult};
pub use generate::{GenerateError, GenerateErrorKind};
pub use transport::{TransportError, TransportErrorKind};
pub use validation::{ValidationError, ValidationErrorKind};
