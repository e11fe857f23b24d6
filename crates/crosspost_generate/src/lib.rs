//! Optional AI text generation for Crosspost.
//!
//! Drafts video descriptions, post captions and content ideas from a short
//! subject. The upload client never depends on this crate; the CLI and the
//! web server enable it only when a `GEMINI_API_KEY` is configured.
//!
//! # Example
//!
//! ```rust,no_run
//! use crosspost_generate::{GeminiGenerator, GenerateConfig, GenerationKind, generate_content};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = GeminiGenerator::new(&GenerateConfig::from_env()?)?;
//! let caption = generate_content(&generator, GenerationKind::PostCaption, "our new espresso bar").await?;
//! println!("{caption}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod gemini;
mod generator;
mod kind;

pub use config::{DEFAULT_MODEL, GEMINI_API_KEY_ENV, GenerateConfig};
pub use gemini::GeminiGenerator;
pub use generator::{TextGenerator, generate_content};
pub use kind::GenerationKind;
