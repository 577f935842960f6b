//! MedStat Companion server binary

use clap::Parser;
use medstat_connector_gemini::GeminiGateway;
use medstat_core::prelude::*;
use medstat_http::HttpApi;
use std::process;
use std::sync::Arc;
use tracing::{error, info, warn, Level};

mod config;

use config::ServerConfig;

#[derive(Debug, Parser)]
#[command(name = "medstatd", version, about = "MedStat Companion course backend")]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    // Initialize logging
    let log_level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Load configuration
    let config = match ServerConfig::load(&args.config).await {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let gemini = config.gemini_config();
    if gemini.api_key.is_none() {
        // Soft failure: the server still comes up, generation endpoints
        // answer 500 until the key is configured.
        warn!("GEMINI_API_KEY is not set; generation endpoints will fail until it is configured");
    }

    let gateway = match GeminiGateway::new(gemini) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            error!("failed to initialize Gemini gateway: {}", e);
            process::exit(1);
        }
    };

    info!("starting medstatd with model {}", config.model);

    let api = HttpApi::new(config.http_config());
    if let Err(e) = api.start(gateway).await {
        error!("server failed: {}", e);
        process::exit(1);
    }
}
