//! Upload command handlers.

use super::{OutputFormat, exit_code, print_result};
use crosspost_client::{ClientConfig, UploadClient, UploadResult, UploadSettings};
use crosspost_core::{MediaRef, Platform};
use crosspost_error::CrosspostResult;
use std::process::ExitCode;
use tracing::info;

/// Build an upload client from configuration, preferring `api_key`.
pub fn load_client(api_key: Option<&str>) -> CrosspostResult<UploadClient> {
    let settings = UploadSettings::load()?;
    let config = ClientConfig::from_settings(&settings, api_key)?;
    info!(base_url = %config.base_url, "Upload client configured");
    UploadClient::new(config)
}

fn finish(result: &UploadResult, format: OutputFormat) -> ExitCode {
    if let Err(e) = print_result(result, format) {
        tracing::error!(error = %e, "Failed to render result");
    }
    ExitCode::from(exit_code(result))
}

/// `crosspost video`
pub async fn run_video(
    client: &UploadClient,
    video: &str,
    title: String,
    user: String,
    platforms: Vec<Platform>,
    format: OutputFormat,
) -> CrosspostResult<ExitCode> {
    let result = client
        .upload_video(MediaRef::parse(video), title, user, platforms)
        .await?;
    Ok(finish(&result, format))
}

/// `crosspost photos`
pub async fn run_photos(
    client: &UploadClient,
    photos: &[String],
    title: String,
    user: String,
    caption: Option<String>,
    platforms: Vec<Platform>,
    format: OutputFormat,
) -> CrosspostResult<ExitCode> {
    let media = photos.iter().map(|p| MediaRef::parse(p));
    let result = client
        .upload_photos(media, title, user, platforms, caption)
        .await?;
    Ok(finish(&result, format))
}

/// `crosspost text`
pub async fn run_text(
    client: &UploadClient,
    title: String,
    user: String,
    platforms: Vec<Platform>,
    format: OutputFormat,
) -> CrosspostResult<ExitCode> {
    let result = client.upload_text(title, user, platforms).await?;
    Ok(finish(&result, format))
}
