use anyhow::Result;
use clap::Parser;
use crosspost_client::{ClientConfig, UploadClient, UploadSettings};
use crosspost_generate::{GeminiGenerator, GenerateConfig};
use crosspost_server::{AppState, GenerateSettings, ServerSettings, serve};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Crosspost web API", long_about = None)]
struct Args {
    /// Address to listen on (overrides [server].bind)
    #[arg(short, long)]
    bind: Option<String>,

    /// Directory for staging uploaded media (overrides [server].upload_dir)
    #[arg(long)]
    upload_dir: Option<PathBuf>,

    /// Upload-Post API key (falls back to the key file and UPLOAD_POST_API_KEY)
    #[arg(long, env = "UPLOAD_POST_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn upload_client(api_key: Option<&str>) -> Option<UploadClient> {
    let client = UploadSettings::load()
        .and_then(|settings| ClientConfig::from_settings(&settings, api_key))
        .map_err(crosspost_error::CrosspostError::from)
        .and_then(UploadClient::new);

    match client {
        Ok(client) => {
            info!("Upload client initialized");
            Some(client)
        }
        Err(e) => {
            warn!(error = %e, "Upload client not initialized; upload features disabled");
            None
        }
    }
}

fn generator() -> Option<GeminiGenerator> {
    let generator = GenerateSettings::load()
        .map(|settings| settings.model)
        .map_err(crosspost_error::CrosspostError::from)
        .and_then(|model| {
            let config = GenerateConfig::from_env()?.with_model(model);
            Ok(GeminiGenerator::new(&config)?)
        });

    match generator {
        Ok(generator) => {
            info!("Text generator initialized");
            Some(generator)
        }
        Err(e) => {
            warn!(error = %e, "Text generator not initialized; generation disabled");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(args.verbose, args.json_logs);

    let mut settings = ServerSettings::load()?;
    if let Some(bind) = args.bind {
        settings.bind = bind;
    }
    if let Some(upload_dir) = args.upload_dir {
        settings.upload_dir = upload_dir;
    }

    let mut state = AppState::new(settings.upload_dir.clone(), settings.max_body_bytes);
    if let Some(client) = upload_client(args.api_key.as_deref()) {
        state = state.with_uploader(client);
    }
    if let Some(generator) = generator() {
        state = state.with_generator(generator);
    }

    serve(&settings, state).await
}
