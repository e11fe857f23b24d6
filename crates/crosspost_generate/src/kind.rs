//! What kind of text to draft.

use serde::{Deserialize, Serialize};

/// Prompt template selector.
///
/// Labels are snake_case (`video_description`, `post_caption`,
/// `content_ideas`). Unrecognized labels fall back to [`GenerationKind::Raw`],
/// which forwards the prompt untouched.
///
/// # Examples
///
/// ```
/// use crosspost_generate::GenerationKind;
///
/// assert_eq!(GenerationKind::from_label("content_ideas"), GenerationKind::ContentIdeas);
/// assert_eq!(GenerationKind::from_label("haiku"), GenerationKind::Raw);
/// assert_eq!(GenerationKind::Raw.prompt("write a haiku"), "write a haiku");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GenerationKind {
    /// SEO-friendly video description with hashtags
    VideoDescription,
    /// Social media caption with emojis and hashtags
    #[default]
    PostCaption,
    /// A list of content ideas
    ContentIdeas,
    /// The prompt as given
    Raw,
}

impl GenerationKind {
    /// Parse a label, falling back to [`GenerationKind::Raw`].
    pub fn from_label(label: &str) -> Self {
        label.trim().parse().unwrap_or(GenerationKind::Raw)
    }

    /// Expand `subject` into the full prompt sent to the model.
    pub fn prompt(self, subject: &str) -> String {
        match self {
            GenerationKind::VideoDescription => format!(
                "Generate an engaging video description for: {}. Make it SEO-friendly and include relevant hashtags.",
                subject
            ),
            GenerationKind::PostCaption => format!(
                "Generate an engaging social media caption for: {}. Include relevant emojis and hashtags.",
                subject
            ),
            GenerationKind::ContentIdeas => format!(
                "Generate creative content ideas for: {}. Provide 5-10 unique and engaging ideas.",
                subject
            ),
            GenerationKind::Raw => subject.to_string(),
        }
    }
}
