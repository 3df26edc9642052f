//! learnpal CLI: the main entry point.
//!
//! Commands:
//! - `serve`: Start the HTTP API server
//! - `migrate`: Create the database tables
//! - `seed`: Load learning styles, tasks and users from JSON
//! - `doctor`: Diagnose configuration, database and API key
//! - `config`: Show the effective configuration or its path

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "learnpal",
    about = "learnpal: learning assistant REST backend",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config.toml
    #[arg(short, long, global = true, env = "LEARNPAL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create the database tables if they do not exist
    Migrate,

    /// Insert seed data from a JSON file
    ///
    /// Rows are inserted one at a time without a transaction. The first
    /// failure stops the run and rows inserted before it are kept.
    Seed {
        /// JSON file with `learning_styles`, `tasks` and `users` arrays
        file: PathBuf,
    },

    /// Diagnose system health
    Doctor,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration with secrets masked
    Show,
    /// Print the config file path in use
    Path,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Serve { port } => commands::serve::run(config_path, port).await?,
        Commands::Migrate => commands::migrate::run(config_path).await?,
        Commands::Seed { file } => commands::seed::run(config_path, &file).await?,
        Commands::Doctor => commands::doctor::run(config_path).await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show(config_path).await?,
            ConfigAction::Path => commands::config_cmd::path(config_path).await?,
        },
    }

    Ok(())
}
