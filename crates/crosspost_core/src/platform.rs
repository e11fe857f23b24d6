//! Destination platforms.

use crate::ContentKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// A social network content can be published to.
///
/// Platform names are lowercase on the wire and on the command line.
///
/// # Examples
///
/// ```
/// use crosspost_core::Platform;
///
/// let platform: Platform = "linkedin".parse().unwrap();
/// assert_eq!(platform, Platform::LinkedIn);
/// assert_eq!(Platform::TikTok.to_string(), "tiktok");
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
pub enum Platform {
    /// TikTok
    TikTok,
    /// Instagram
    Instagram,
    /// LinkedIn
    LinkedIn,
    /// YouTube
    YouTube,
    /// Facebook
    Facebook,
    /// X (formerly Twitter)
    X,
    /// Threads
    Threads,
    /// Pinterest
    Pinterest,
}

impl Platform {
    /// Lowercase platform name as used by the publishing API.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Content kinds this platform accepts.
    pub fn supported_kinds(self) -> Vec<ContentKind> {
        ContentKind::iter().filter(|kind| kind.allows(self)).collect()
    }
}

/// The full kind → allowed platforms table, keyed by content kind.
///
/// Serializes to `{"video": [...], "photos": [...], "text": [...]}`.
pub fn platform_table() -> BTreeMap<ContentKind, Vec<Platform>> {
    ContentKind::iter()
        .map(|kind| (kind, kind.allowed_platforms().to_vec()))
        .collect()
}
