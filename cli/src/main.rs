use anyhow::{Context, Result};
use clap::Parser;
use cinebot_core::config::CineConfig;
use cinebot_core::{GeminiClient, RecommendationAssistant};
use tracing::{debug, info};

mod app;
mod cli;
mod logging;
mod output;
mod source;

use crate::cli::{Args, Command};

/// Main function - resolves configuration and dispatches to a view
#[tokio::main]
async fn main() -> Result<()> {
    // `.env` first, so clap's env fallbacks and GEMINI_KEY pick it up
    let dotenv_path = cli::load_dotenv(None);

    // Parse command-line arguments
    let args = Args::parse();

    // Flags take precedence over environment and the config file
    let overrides = CineConfig {
        model_name: args.model.clone(),
        log_level: args.log_level.clone(),
        ..CineConfig::empty()
    };
    let config = CineConfig::resolve(args.config.as_deref(), &overrides)
        .context("Failed to load configuration")?;

    logging::init(config.log_level.as_deref().unwrap_or("warn"));
    debug!(model = config.model_name(), base_url = config.api_base_url(), "Configuration resolved");
    if let Some(path) = &dotenv_path {
        debug!("Loaded environment from {}", path.display());
    }

    let assistant = RecommendationAssistant::new(GeminiClient::new(config));

    match args.command.unwrap_or(Command::Interactive { show_source: false }) {
        Command::Interactive { show_source } => {
            app::run_interactive(&assistant, show_source).await?;
        }
        Command::Recommend {
            genres,
            min_year,
            max_year,
        } => {
            let _outcome = app::run_recommend(&assistant, &genres, min_year, max_year).await?;
        }
        Command::Ask { question } => {
            let _outcome = app::run_ask(&assistant, &question.join(" ")).await?;
        }
        Command::Genres => app::run_genres(),
        Command::Source => app::run_source(),
    }

    info!("CineBot finished");
    Ok(())
}
