//! Content kinds and the platform policy attached to each.

use crate::Platform;
use serde::{Deserialize, Serialize};

/// The shape of a single piece of content submitted for distribution.
///
/// The kind decides which platforms may receive the content and how many
/// media items must accompany it.
///
/// # Examples
///
/// ```
/// use crosspost_core::{ContentKind, Platform};
///
/// assert!(ContentKind::Video.allows(Platform::YouTube));
/// assert!(!ContentKind::Photos.allows(Platform::YouTube));
/// assert_eq!("text".parse::<ContentKind>().unwrap(), ContentKind::Text);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ContentKind {
    /// A single video file or URL
    Video,
    /// One or more images
    Photos,
    /// A text-only post
    Text,
}

const VIDEO_PLATFORMS: &[Platform] = &[
    Platform::TikTok,
    Platform::Instagram,
    Platform::LinkedIn,
    Platform::YouTube,
    Platform::Facebook,
    Platform::X,
    Platform::Threads,
    Platform::Pinterest,
];

const PHOTO_PLATFORMS: &[Platform] = &[
    Platform::TikTok,
    Platform::Instagram,
    Platform::LinkedIn,
    Platform::Facebook,
    Platform::X,
    Platform::Threads,
    Platform::Pinterest,
];

const TEXT_PLATFORMS: &[Platform] = &[
    Platform::LinkedIn,
    Platform::X,
    Platform::Facebook,
    Platform::Threads,
];

impl ContentKind {
    /// Platforms that accept this kind of content, in presentation order.
    pub fn allowed_platforms(self) -> &'static [Platform] {
        match self {
            ContentKind::Video => VIDEO_PLATFORMS,
            ContentKind::Photos => PHOTO_PLATFORMS,
            ContentKind::Text => TEXT_PLATFORMS,
        }
    }

    /// Whether `platform` accepts this kind of content.
    pub fn allows(self, platform: Platform) -> bool {
        self.allowed_platforms().contains(&platform)
    }

    /// Whether uploads of this kind carry media.
    pub fn requires_media(self) -> bool {
        !matches!(self, ContentKind::Text)
    }
}
