//! Command-line interface.
//!
//! Argument definitions and handlers for the `crosspost` binary. Handlers
//! return the process exit status so the binary stays a thin dispatcher.

mod commands;
mod generate;
mod output;
mod upload;

pub use commands::{
    Cli, Commands, OutputFormat, parse_photo_platform, parse_text_platform, parse_video_platform,
};
pub use generate::run_generate;
pub use output::{exit_code, print_platforms, print_result, usage_exit_code};
pub use upload::{load_client, run_photos, run_text, run_video};
