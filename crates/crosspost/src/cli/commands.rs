//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use crosspost_core::{ContentKind, Platform};
use crosspost_generate::{DEFAULT_MODEL, GenerationKind};

/// Crosspost - publish videos, photos and text posts to social platforms
#[derive(Parser, Debug)]
#[command(name = "crosspost")]
#[command(about = "Publish videos, photos and text posts to many social platforms", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Upload-Post API key (falls back to the configured key file and UPLOAD_POST_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Output format for results
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a video
    Video {
        /// Path to the video file, or an http(s) URL
        #[arg(long)]
        video: String,

        /// Video title
        #[arg(long)]
        title: String,

        /// Account identifier on the publishing service
        #[arg(long)]
        user: String,

        /// Target platforms
        #[arg(long, required = true, num_args = 1.., value_delimiter = ',', value_parser = parse_video_platform)]
        platforms: Vec<Platform>,
    },

    /// Upload one or more photos
    Photos {
        /// Paths to photo files, or http(s) URLs
        #[arg(long, required = true, num_args = 1..)]
        photos: Vec<String>,

        /// Album title
        #[arg(long)]
        title: String,

        /// Account identifier on the publishing service
        #[arg(long)]
        user: String,

        /// Optional caption
        #[arg(long)]
        caption: Option<String>,

        /// Target platforms
        #[arg(long, required = true, num_args = 1.., value_delimiter = ',', value_parser = parse_photo_platform)]
        platforms: Vec<Platform>,
    },

    /// Publish a text post
    Text {
        /// Text of the post
        #[arg(long)]
        title: String,

        /// Account identifier on the publishing service
        #[arg(long)]
        user: String,

        /// Target platforms
        #[arg(long, required = true, num_args = 1.., value_delimiter = ',', value_parser = parse_text_platform)]
        platforms: Vec<Platform>,
    },

    /// Show which platforms accept each kind of content
    Platforms,

    /// Draft a caption, description or content ideas with Gemini
    Generate {
        /// What to draft: video_description, post_caption, content_ideas or raw
        #[arg(long = "type", default_value = "post_caption", value_parser = parse_generation_kind)]
        kind: GenerationKind,

        /// Subject to write about
        #[arg(long)]
        prompt: String,

        /// Gemini model
        #[arg(long, env = "CROSSPOST__GENERATE__MODEL", default_value = DEFAULT_MODEL)]
        model: String,
    },
}

/// Output format for results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Human,
    /// Pretty-printed JSON
    Json,
}

fn parse_platform_for(kind: ContentKind, value: &str) -> Result<Platform, String> {
    let choices = || {
        kind.allowed_platforms()
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let platform: Platform = value
        .trim()
        .parse()
        .map_err(|_| format!("unknown platform '{}' (choose from {})", value, choices()))?;
    if kind.allows(platform) {
        Ok(platform)
    } else {
        Err(format!(
            "{} does not accept {} content (choose from {})",
            platform,
            kind,
            choices()
        ))
    }
}

/// Parse a platform that accepts videos.
pub fn parse_video_platform(value: &str) -> Result<Platform, String> {
    parse_platform_for(ContentKind::Video, value)
}

/// Parse a platform that accepts photos.
pub fn parse_photo_platform(value: &str) -> Result<Platform, String> {
    parse_platform_for(ContentKind::Photos, value)
}

/// Parse a platform that accepts text posts.
pub fn parse_text_platform(value: &str) -> Result<Platform, String> {
    parse_platform_for(ContentKind::Text, value)
}

fn parse_generation_kind(value: &str) -> Result<GenerationKind, String> {
    Ok(GenerationKind::from_label(value))
}
