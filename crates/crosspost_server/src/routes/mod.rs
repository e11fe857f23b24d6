//! Route handlers.

pub mod generate;
pub mod health;
pub mod platforms;
pub mod upload;

use crate::ApiError;

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}
