//! Platform policy table.

use axum::Json;
use crosspost_core::{ContentKind, Platform, platform_table};
use std::collections::BTreeMap;

/// Allowed platforms per content kind.
pub async fn list() -> Json<BTreeMap<ContentKind, Vec<Platform>>> {
    Json(platform_table())
}
