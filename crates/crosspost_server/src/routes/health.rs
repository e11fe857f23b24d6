//! Health and capability status.

use crate::AppState;
use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

/// Report which capabilities are configured.
pub async fn status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "upload_available": state.uploader().is_some(),
        "generate_available": state.generator().is_some(),
        "model": state.generator().map(|g| g.model_name()),
    }))
}
