//! The upload request consumed by the client.

use crate::{ContentKind, MediaRef, Platform};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One content item bound for a set of platforms.
///
/// Requests are built per call and consumed once. The platform set is
/// deduplicated by construction; emptiness and kind eligibility are checked
/// by the client before anything is sent.
///
/// # Examples
///
/// ```
/// use crosspost_core::{ContentKind, MediaRef, Platform, UploadRequest};
///
/// let request = UploadRequest::builder()
///     .kind(ContentKind::Photos)
///     .user("brand-account")
///     .title("Launch day")
///     .platforms([Platform::Instagram, Platform::X])
///     .platform(Platform::X)
///     .media_item(MediaRef::parse("https://cdn.example.com/a.jpg"))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.platforms().len(), 2);
/// assert_eq!(request.media().len(), 1);
/// assert!(request.caption().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct UploadRequest {
    /// Content kind, fixed for the lifetime of the request.
    kind: ContentKind,

    /// Opaque account identifier on the publishing service.
    user: String,

    /// Destination platforms.
    #[builder(default, setter(into, each(name = "platform")))]
    #[serde(default)]
    platforms: BTreeSet<Platform>,

    /// Title, or the post body for text content.
    #[builder(default)]
    #[serde(default)]
    title: String,

    /// Optional caption.
    #[builder(default)]
    #[serde(default)]
    caption: Option<String>,

    /// Media items in submission order.
    #[builder(default, setter(into, each(name = "media_item")))]
    #[serde(default)]
    media: Vec<MediaRef>,
}

impl UploadRequest {
    /// Creates a new request builder.
    pub fn builder() -> UploadRequestBuilder {
        UploadRequestBuilder::default()
    }

    /// Caption text, empty when none was supplied.
    pub fn caption_or_default(&self) -> &str {
        self.caption.as_deref().unwrap_or_default()
    }
}
