//! HTTP front end for Crosspost.
//!
//! Exposes the upload client and the optional text generator over a small
//! JSON API:
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /health`, `GET /api/status` | Which capabilities are configured |
//! | `GET /api/platforms` | Allowed platforms per content kind |
//! | `POST /api/upload` | Multipart upload of a video, photos or a text post |
//! | `POST /api/generate` | Draft a caption, description or content ideas |
//!
//! Upload outcomes map to HTTP statuses: success is 200, partial failure is
//! 207, a rejected upload is 400 and an unexpected failure is 500. Without an
//! upload credential the upload route answers 503.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod routes;
mod server;
mod settings;
mod state;

pub use error::{ApiError, ApiResult};
pub use server::{router, serve};
pub use settings::{GenerateSettings, ServerSettings};
pub use state::AppState;
