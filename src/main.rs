//! Promptkeep - prompt file editor backend
//!
//! Main entry point for the Promptkeep server and CLI.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use promptkeep::cli::{Cli, Commands};
use promptkeep::commands;
use promptkeep::config::Config;
use promptkeep::server;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal outside development
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    if dotenv_loaded {
        tracing::debug!("Loaded environment from .env");
    }

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    let store = commands::open_store(&config.storage).await?;

    // Execute command
    match cli.command {
        Commands::Serve { .. } => {
            tracing::info!("Starting prompt API server");
            server::serve(&config.server, store).await?;
            Ok(())
        }
        Commands::List => {
            commands::prompts::list(&store).await?;
            Ok(())
        }
        Commands::Show { filename } => {
            commands::prompts::show(&store, &filename).await?;
            Ok(())
        }
        Commands::Save {
            filename,
            content,
            file,
        } => {
            let source = commands::prompts::ContentSource::from_args(content, file);
            tracing::debug!("Saving {} from {:?}", filename, source);
            commands::prompts::save(&store, &filename, source).await?;
            Ok(())
        }
        Commands::History { command } => {
            tracing::debug!("Starting history command");
            commands::history::handle_history(&store, command).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "promptkeep=debug,tower_http=debug"
    } else {
        "promptkeep=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
