//! Result rendering and exit codes.

use super::OutputFormat;
use crosspost_client::{UploadResult, UploadStatus};
use crosspost_core::platform_table;

/// Exit code for an upload outcome: 0 success, 2 partial failure, 1 failure.
pub fn exit_code(result: &UploadResult) -> u8 {
    match result.status() {
        UploadStatus::Success => 0,
        UploadStatus::PartialFailure => 2,
        UploadStatus::Failure => 1,
    }
}

/// Exit code for an argument error: 0 for `--help` and `--version`, 1 otherwise.
///
/// Clap's own usage code 2 would be read as a partial failure.
pub fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() { 1 } else { 0 }
}

/// Print an upload result to stdout.
pub fn print_result(result: &UploadResult, format: OutputFormat) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Human => {
            let headline = match result.status() {
                UploadStatus::Success => "✅ Upload successful",
                UploadStatus::PartialFailure => "⚠️  Upload partially failed",
                UploadStatus::Failure => "❌ Upload failed",
            };
            println!("{}", headline);
            if let Some(reason) = result.failure() {
                println!("   {}", reason);
            }
            for (platform, status) in result.platforms() {
                println!("   {:<10} {}", platform.as_str(), status);
            }
        }
    }
    Ok(())
}

/// Print the allowed platforms per content kind.
pub fn print_platforms(format: OutputFormat) -> Result<(), serde_json::Error> {
    let table = platform_table();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&table)?),
        OutputFormat::Human => {
            for (kind, platforms) in &table {
                let names: Vec<_> = platforms.iter().map(|p| p.as_str()).collect();
                println!("{:<7} {}", kind, names.join(", "));
            }
        }
    }
    Ok(())
}
