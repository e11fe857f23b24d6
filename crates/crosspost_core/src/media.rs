//! Media references for video and photo uploads.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where a media item comes from.
///
/// A local file stays owned by whoever supplied it; the client only reads
/// it while the request is in flight and never deletes it. A URL is passed
/// to the publishing API as-is.
///
/// # Examples
///
/// ```
/// use crosspost_core::MediaRef;
///
/// let remote = MediaRef::parse("https://cdn.example.com/clip.mp4");
/// assert!(remote.is_url());
///
/// let local = MediaRef::parse("clips/clip.mp4");
/// assert!(!local.is_url());
/// assert_eq!(local.file_name(), "clip.mp4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum MediaRef {
    /// A file on the local filesystem
    #[display("{}", _0.display())]
    File(PathBuf),
    /// A remote URL the publishing API fetches itself
    #[display("{}", _0)]
    Url(String),
}

impl MediaRef {
    /// Classify a raw reference: `http://` and `https://` prefixes are URLs,
    /// everything else is a local path.
    pub fn parse(reference: &str) -> Self {
        let trimmed = reference.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            MediaRef::Url(trimmed.to_string())
        } else {
            MediaRef::File(PathBuf::from(trimmed))
        }
    }

    /// Reference a local file.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        MediaRef::File(path.into())
    }

    /// Reference a remote URL.
    pub fn url(url: impl Into<String>) -> Self {
        MediaRef::Url(url.into())
    }

    /// Whether this is a remote reference.
    pub fn is_url(&self) -> bool {
        matches!(self, MediaRef::Url(_))
    }

    /// Final path or URL segment, used as the attachment file name.
    pub fn file_name(&self) -> String {
        match self {
            MediaRef::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string()),
            MediaRef::Url(url) => url
                .split(['?', '#'])
                .next()
                .and_then(|path| path.rsplit('/').next())
                .filter(|segment| !segment.is_empty())
                .unwrap_or("upload")
                .to_string(),
        }
    }
}

impl From<PathBuf> for MediaRef {
    fn from(path: PathBuf) -> Self {
        MediaRef::File(path)
    }
}

impl From<&Path> for MediaRef {
    fn from(path: &Path) -> Self {
        MediaRef::File(path.to_path_buf())
    }
}

impl From<&str> for MediaRef {
    fn from(reference: &str) -> Self {
        MediaRef::parse(reference)
    }
}

/// MIME type for a media file, derived from its extension.
///
/// Unknown extensions fall back to `application/octet-stream`.
pub fn mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        Some("wmv") => "video/x-ms-wmv",
        Some("flv") => "video/x-flv",
        Some("mkv") => "video/x-matroska",
        Some("webm") => "video/webm",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
