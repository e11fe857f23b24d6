//! Text generation command handler.

use super::OutputFormat;
use crosspost_error::CrosspostResult;
use crosspost_generate::{GeminiGenerator, GenerateConfig, GenerationKind, generate_content};
use serde_json::json;

/// `crosspost generate`
pub async fn run_generate(
    kind: GenerationKind,
    prompt: &str,
    model: &str,
    format: OutputFormat,
) -> CrosspostResult<()> {
    let config = GenerateConfig::from_env()?.with_model(model);
    let generator = GeminiGenerator::new(&config)?;
    let content = generate_content(&generator, kind, prompt).await?;

    match format {
        OutputFormat::Human => println!("{}", content),
        OutputFormat::Json => println!(
            "{}",
            json!({ "success": true, "type": kind, "content": content })
        ),
    }
    Ok(())
}
