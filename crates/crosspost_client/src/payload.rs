//! Outbound payload assembly.

use crosspost_core::{ContentKind, MediaRef, Platform, UploadRequest, mime_type};
use crosspost_error::{BuildError, BuildErrorKind};
use derive_getters::Getters;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One multipart field of the outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadPart {
    /// Plain text field
    Text {
        /// Field name
        name: String,
        /// Field value
        value: String,
    },
    /// Local file attachment, read by the transport at send time
    File {
        /// Field name
        name: String,
        /// Path of the caller-owned file
        path: PathBuf,
        /// File name reported to the API
        file_name: String,
        /// MIME type derived from the extension
        mime: &'static str,
    },
}

impl PayloadPart {
    fn text(name: &str, value: impl Into<String>) -> Self {
        PayloadPart::Text {
            name: name.to_string(),
            value: value.into(),
        }
    }

    /// Field name of this part.
    pub fn name(&self) -> &str {
        match self {
            PayloadPart::Text { name, .. } | PayloadPart::File { name, .. } => name,
        }
    }
}

/// A self-contained request ready for a [`Transport`](crate::Transport).
///
/// Holds metadata, the target platform list and attachment references. Local
/// files are referenced by path only; nothing is read or deleted here.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Payload {
    /// Content kind the payload was built for.
    kind: ContentKind,
    /// Target platforms in platform order.
    platforms: Vec<Platform>,
    /// Multipart fields in submission order.
    parts: Vec<PayloadPart>,
}

impl Payload {
    /// API path (relative to the base URL) for this payload's content kind.
    pub fn endpoint(&self) -> &'static str {
        match self.kind {
            ContentKind::Video => "upload",
            ContentKind::Photos => "upload_photos",
            ContentKind::Text => "upload_text",
        }
    }

    /// Values of every text field called `name`.
    pub fn text_values(&self, name: &str) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                PayloadPart::Text { name: n, value } if n == name => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Paths of every file attachment.
    pub fn file_paths(&self) -> Vec<&Path> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                PayloadPart::File { path, .. } => Some(path.as_path()),
                PayloadPart::Text { .. } => None,
            })
            .collect()
    }
}

const VIDEO_FIELD: &str = "video";
const PHOTOS_FIELD: &str = "photos[]";
const PLATFORM_FIELD: &str = "platform[]";

/// Turns a validated [`UploadRequest`] into a [`Payload`].
///
/// - Video: exactly one readable file or well-formed URL.
/// - Photos: invalid items are dropped; fails only when none remain.
/// - Text: any supplied media is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadBuilder;

impl PayloadBuilder {
    /// Create a builder.
    pub fn new() -> Self {
        Self
    }

    /// Assemble the payload for `request`.
    pub fn build(&self, request: &UploadRequest) -> Result<Payload, BuildError> {
        let kind = *request.kind();

        if kind.requires_media() && request.title().trim().is_empty() {
            return Err(BuildError::new(BuildErrorKind::MissingTitle));
        }

        let mut parts = vec![
            PayloadPart::text("user", request.user().clone()),
            PayloadPart::text("title", request.title().clone()),
        ];
        parts.extend(
            request
                .platforms()
                .iter()
                .map(|platform| PayloadPart::text(PLATFORM_FIELD, platform.as_str())),
        );

        match kind {
            ContentKind::Video => {
                parts.push(Self::video_part(request.media())?);
                if let Some(caption) = request.caption() {
                    parts.push(PayloadPart::text("caption", caption.clone()));
                }
            }
            ContentKind::Photos => {
                parts.extend(Self::photo_parts(request.media())?);
                parts.push(PayloadPart::text("caption", request.caption_or_default()));
            }
            ContentKind::Text => {
                if !request.media().is_empty() {
                    debug!(
                        count = request.media().len(),
                        "Ignoring media supplied with a text post"
                    );
                }
            }
        }

        Ok(Payload {
            kind,
            platforms: request.platforms().iter().copied().collect(),
            parts,
        })
    }

    fn video_part(media: &[MediaRef]) -> Result<PayloadPart, BuildError> {
        match media {
            [] => Err(BuildError::new(BuildErrorKind::MissingMedia)),
            [video] => media_part(VIDEO_FIELD, video)
                .ok_or_else(|| BuildError::new(BuildErrorKind::InvalidMediaType(video.to_string()))),
            many => Err(BuildError::new(BuildErrorKind::TooManyMedia(many.len()))),
        }
    }

    fn photo_parts(media: &[MediaRef]) -> Result<Vec<PayloadPart>, BuildError> {
        if media.is_empty() {
            return Err(BuildError::new(BuildErrorKind::MissingMedia));
        }

        let mut parts = Vec::with_capacity(media.len());
        let mut rejected = 0;
        for photo in media {
            match media_part(PHOTOS_FIELD, photo) {
                Some(part) => parts.push(part),
                None => {
                    warn!(media = %photo, "Dropping photo that is neither a readable file nor a valid URL");
                    rejected += 1;
                }
            }
        }

        if parts.is_empty() {
            return Err(BuildError::new(BuildErrorKind::NoValidMedia { rejected }));
        }
        Ok(parts)
    }
}

/// Part for a single media item, or `None` if the item is unusable.
fn media_part(field: &str, media: &MediaRef) -> Option<PayloadPart> {
    match media {
        MediaRef::File(path) => is_readable_file(path).then(|| PayloadPart::File {
            name: field.to_string(),
            path: path.clone(),
            file_name: media.file_name(),
            mime: mime_type(path),
        }),
        MediaRef::Url(url) => is_well_formed_url(url).then(|| PayloadPart::text(field, url.clone())),
    }
}

/// A regular file that opens and yields its first read.
fn is_readable_file(path: &Path) -> bool {
    let is_file = std::fs::metadata(path)
        .map(|meta| meta.is_file())
        .unwrap_or(false);
    is_file
        && File::open(path)
            .and_then(|mut file| file.read(&mut [0u8; 1]))
            .is_ok()
}

fn is_well_formed_url(url: &str) -> bool {
    reqwest::Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some())
        .unwrap_or(false)
}
