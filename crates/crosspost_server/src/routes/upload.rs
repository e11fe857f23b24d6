//! Multipart upload intake.

use crate::{ApiError, ApiResult, AppState};
use axum::Json;
use axum::extract::multipart::{Field, MultipartError};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use crosspost_client::{UploadResult, UploadStatus};
use crosspost_core::{ContentKind, MediaRef, Platform, UploadRequest};
use crosspost_error::BuildError;
use serde_json::{Value, json};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, instrument, warn};

/// Video extensions accepted from the browser.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "wmv", "flv", "mkv"];

/// Image extensions accepted from the browser.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp"];

const DEFAULT_USER: &str = "default_user";

/// A file part written to the request's staging directory.
#[derive(Debug)]
struct StagedFile {
    field: String,
    path: PathBuf,
}

impl StagedFile {
    fn has_extension(&self, allowed: &[&str]) -> bool {
        has_allowed_extension(&self.path, allowed)
    }
}

/// Form fields collected from one multipart body.
///
/// Staged files live in `staging` and are removed when the form is dropped,
/// whichever way the request ends.
#[derive(Debug)]
struct UploadForm {
    kind: Option<String>,
    user: Option<String>,
    title: String,
    caption: Option<String>,
    platforms: Vec<String>,
    urls: Vec<(String, String)>,
    files: Vec<StagedFile>,
    staging: TempDir,
}

impl UploadForm {
    async fn read(multipart: &mut Multipart, state: &AppState) -> ApiResult<Self> {
        let staging = tempfile::Builder::new()
            .prefix("upload-")
            .tempdir_in(state.upload_dir())
            .map_err(|e| {
                tracing::error!(error = %e, dir = %state.upload_dir().display(), "Cannot create staging directory");
                ApiError::internal("Upload failed")
            })?;

        let mut form = Self {
            kind: None,
            user: None,
            title: String::new(),
            caption: None,
            platforms: Vec::new(),
            urls: Vec::new(),
            files: Vec::new(),
            staging,
        };

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| multipart_error(e, state.max_body_bytes()))?
        {
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field.file_name().map(sanitize_file_name);
            match file_name {
                Some(Some(file_name)) => form.stage(name, file_name, field, state).await?,
                // An empty file input still arrives as a part
                Some(None) => debug!(field = %name, "Skipping file part without a name"),
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| multipart_error(e, state.max_body_bytes()))?;
                    form.set_text(&name, value);
                }
            }
        }
        Ok(form)
    }

    fn set_text(&mut self, name: &str, value: String) {
        let value = value.trim().to_string();
        if value.is_empty() {
            return;
        }
        match name {
            "type" => self.kind = Some(value),
            "user" => self.user = Some(value),
            "title" => self.title = value,
            "caption" => self.caption = Some(value),
            "platforms[]" | "platforms" => self.platforms.push(value),
            "url" | "urls[]" | "urls" => self.urls.push((name.to_string(), value)),
            other => debug!(field = %other, "Ignoring unknown form field"),
        }
    }

    async fn stage(
        &mut self,
        field_name: String,
        file_name: String,
        field: Field<'_>,
        state: &AppState,
    ) -> ApiResult<()> {
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, state.max_body_bytes()))?;

        let path = unique_path(self.staging.path(), &file_name);
        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            tracing::error!(error = %e, path = %path.display(), "Cannot stage uploaded file");
            ApiError::internal("Upload failed")
        })?;

        debug!(field = %field_name, path = %path.display(), size = bytes.len(), "Staged upload");
        self.files.push(StagedFile {
            field: field_name,
            path,
        });
        Ok(())
    }

    fn files_in<'a>(&'a self, fields: &'a [&str]) -> impl Iterator<Item = &'a StagedFile> + 'a {
        self.files
            .iter()
            .filter(move |file| fields.contains(&file.field.as_str()))
    }

    fn urls_in<'a>(&'a self, fields: &'a [&str]) -> impl Iterator<Item = &'a str> + 'a {
        self.urls
            .iter()
            .filter(move |(field, _)| fields.contains(&field.as_str()))
            .map(|(_, url)| url.as_str())
    }

    fn content_kind(&self) -> ApiResult<ContentKind> {
        match self.kind.as_deref() {
            None => Ok(ContentKind::Video),
            Some(label) => label
                .parse()
                .map_err(|_| ApiError::bad_request("Invalid upload type")),
        }
    }

    fn platforms(&self) -> ApiResult<Vec<Platform>> {
        self.platforms
            .iter()
            .map(|name| {
                name.parse::<Platform>()
                    .map_err(|_| ApiError::bad_request(format!("Unknown platform '{}'", name)))
            })
            .collect()
    }

    fn video_media(&self) -> ApiResult<Vec<MediaRef>> {
        if let Some(file) = self.files_in(&["file", "video"]).next() {
            if !file.has_extension(VIDEO_EXTENSIONS) {
                return Err(ApiError::bad_request("Invalid file type"));
            }
            return Ok(vec![MediaRef::file(&file.path)]);
        }
        // Form values are only ever remote references, never server paths
        match self.urls_in(&["url"]).next() {
            Some(url) => Ok(vec![MediaRef::url(url)]),
            None => Err(ApiError::bad_request("No video file or URL provided")),
        }
    }

    fn photo_media(&self) -> ApiResult<Vec<MediaRef>> {
        let mut media = Vec::new();
        for file in self.files_in(&["files[]", "files", "photos[]"]) {
            if file.has_extension(IMAGE_EXTENSIONS) {
                media.push(MediaRef::file(&file.path));
            } else {
                warn!(path = %file.path.display(), "Skipping file with unsupported image type");
            }
        }
        media.extend(self.urls_in(&["urls[]", "urls", "url"]).map(MediaRef::url));

        if media.is_empty() {
            return Err(ApiError::bad_request("No valid image files provided"));
        }
        Ok(media)
    }

    fn to_request(&self) -> ApiResult<UploadRequest> {
        let kind = self.content_kind()?;
        let media = match kind {
            ContentKind::Video => self.video_media()?,
            ContentKind::Photos => self.photo_media()?,
            ContentKind::Text => Vec::new(),
        };

        UploadRequest::builder()
            .kind(kind)
            .user(self.user.as_deref().unwrap_or(DEFAULT_USER))
            .title(self.title.clone())
            .caption(self.caption.clone())
            .platforms(self.platforms()?.into_iter().collect::<BTreeSet<_>>())
            .media(media)
            .build()
            .map_err(|e| ApiError::bad_request(BuildError::from(e).kind().to_string()))
    }
}

/// `POST /api/upload`.
#[instrument(skip_all)]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let uploader = state
        .uploader()
        .ok_or_else(|| ApiError::unavailable("Upload service not available"))?;

    let form = UploadForm::read(&mut multipart, &state).await?;
    let request = form.to_request()?;
    debug!(kind = %request.kind(), platforms = request.platforms().len(), "Dispatching upload");

    let result = uploader.upload(&request).await?;

    // Staged files are kept until the upstream call has finished
    drop(form);
    Ok(upload_response(&result))
}

/// Map an upload outcome to a status code and JSON body.
fn upload_response(result: &UploadResult) -> (StatusCode, Json<Value>) {
    let platforms = serde_json::to_value(result.platforms()).unwrap_or(Value::Null);
    let raw = result.raw().clone().unwrap_or(Value::Null);

    match result.status() {
        UploadStatus::Success => (
            StatusCode::OK,
            Json(json!({ "success": true, "response": raw, "platforms": platforms })),
        ),
        UploadStatus::PartialFailure => (
            StatusCode::MULTI_STATUS,
            Json(json!({
                "success": false,
                "partial": true,
                "response": raw,
                "platforms": platforms,
                "failed": result.failed_platforms(),
            })),
        ),
        UploadStatus::Failure => {
            let reason = result.failure().as_ref();
            let message = reason
                .map(|r| r.to_string())
                .unwrap_or_else(|| "Upload failed".to_string());
            let status = if reason.is_some_and(|r| r.is_rejection()) {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            (
                status,
                Json(json!({
                    "success": false,
                    "error": message,
                    "response": raw,
                    "platforms": platforms,
                })),
            )
        }
    }
}

fn multipart_error(err: MultipartError, max_body_bytes: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::too_large(max_body_bytes)
    } else {
        ApiError::bad_request(err.body_text())
    }
}

/// Final path component restricted to a safe character set, or `None` if
/// nothing usable remains.
fn sanitize_file_name(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// First free path for `file_name` in `dir`, prefixing a counter on collision.
fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let mut candidate = dir.join(file_name);
    let mut counter = 1;
    while candidate.exists() {
        candidate = dir.join(format!("{}-{}", counter, file_name));
        counter += 1;
    }
    candidate
}

fn has_allowed_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| allowed.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
