//! AI text generation.

use crate::{ApiError, ApiResult, AppState};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use crosspost_error::GenerateErrorKind;
use crosspost_generate::{GenerationKind, generate_content};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, instrument};

/// Body of `POST /api/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    /// Template label; unknown labels send the prompt as-is
    #[serde(rename = "type", default)]
    kind: Option<String>,
    /// Subject to write about
    #[serde(default)]
    prompt: String,
}

/// Draft text with the configured generator.
#[instrument(skip_all)]
pub async fn generate(
    State(state): State<AppState>,
    body: Result<Json<GenerateBody>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let generator = state
        .generator()
        .ok_or_else(|| ApiError::unavailable("AI service not available"))?;

    let Json(body) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let kind = body
        .kind
        .as_deref()
        .map(GenerationKind::from_label)
        .unwrap_or_default();

    match generate_content(generator, kind, &body.prompt).await {
        Ok(content) => Ok(Json(json!({ "success": true, "content": content }))),
        Err(e) if e.kind == GenerateErrorKind::EmptyPrompt => {
            Err(ApiError::bad_request("No prompt provided"))
        }
        Err(e) => {
            error!(error = %e, "Content generation failed");
            Err(ApiError::internal("Failed to generate content"))
        }
    }
}
