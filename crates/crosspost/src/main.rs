//! Crosspost CLI binary.
//!
//! Uploads a video, photos or a text post and exits with 0 on success,
//! 2 on partial failure and 1 on failure or invalid input.

use clap::Parser;
use crosspost::cli::{
    Cli, Commands, load_client, print_platforms, run_generate, run_photos, run_text, run_video,
    usage_exit_code,
};
use crosspost::CrosspostResult;
use std::process::ExitCode;

fn init_tracing(cli: &Cli) {
    let log_level = if cli.verbose { "debug" } else { "warn" };

    #[cfg(feature = "observability")]
    {
        use crosspost::observability::{ObservabilityConfig, init_observability};
        let config = ObservabilityConfig::new("crosspost")
            .with_log_level(log_level)
            .with_json_logs(cli.json_logs);
        if let Err(e) = init_observability(config) {
            eprintln!("Failed to initialize observability: {}", e);
        }
    }

    #[cfg(not(feature = "observability"))]
    {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);
        if cli.json_logs {
            builder.json().init();
        } else {
            builder.init();
        }
    }
}

async fn run(cli: Cli) -> CrosspostResult<ExitCode> {
    let format = cli.format;
    match cli.command {
        Commands::Video {
            video,
            title,
            user,
            platforms,
        } => {
            let client = load_client(cli.api_key.as_deref())?;
            run_video(&client, &video, title, user, platforms, format).await
        }

        Commands::Photos {
            photos,
            title,
            user,
            caption,
            platforms,
        } => {
            let client = load_client(cli.api_key.as_deref())?;
            run_photos(&client, &photos, title, user, caption, platforms, format).await
        }

        Commands::Text {
            title,
            user,
            platforms,
        } => {
            let client = load_client(cli.api_key.as_deref())?;
            run_text(&client, title, user, platforms, format).await
        }

        Commands::Platforms => {
            if let Err(e) = print_platforms(format) {
                tracing::error!(error = %e, "Failed to render platform table");
                return Ok(ExitCode::FAILURE);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Generate {
            kind,
            prompt,
            model,
        } => {
            run_generate(kind, &prompt, &model, format).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if let Err(io) = e.print() {
                eprintln!("Failed to print usage: {}", io);
                return ExitCode::FAILURE;
            }
            return ExitCode::from(usage_exit_code(&e));
        }
    };
    init_tracing(&cli);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
