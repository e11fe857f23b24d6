//! Core data types for the Crosspost publishing client.
//!
//! This crate provides the data model shared by every Crosspost interface:
//! content kinds, destination platforms, media references and the upload
//! request itself, plus the fixed policy describing which platforms accept
//! which kind of content.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod kind;
mod media;
mod platform;
mod request;

pub use kind::ContentKind;
pub use media::{MediaRef, mime_type};
pub use platform::{Platform, platform_table};
pub use request::{UploadRequest, UploadRequestBuilder, UploadRequestBuilderError};
