//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;

use crate::config;

mod commands;

#[derive(Parser)]
#[command(name = "medx")]
#[command(version)]
#[command(about = "Terminal medical assistant chat")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Starts an interactive chat with the assistant
    Chat {
        /// Override the model from config
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Asks a single question and prints the formatted reply
    Ask {
        /// The question to send to the assistant
        prompt: String,

        /// Override the model from config
        #[arg(short, long)]
        model: Option<String>,

        /// Print the raw reply without formatting
        #[arg(long)]
        raw: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Prints the config file path
    Path,
    /// Creates a default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    match cli.command {
        None => commands::chat::run(&config, None).await,
        Some(Commands::Chat { model }) => commands::chat::run(&config, model.as_deref()).await,
        Some(Commands::Ask { prompt, model, raw }) => {
            commands::ask::run(&prompt, &config, model.as_deref(), raw).await
        }
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
        },
    }
}

/// Initializes tracing to stderr, filtered by `RUST_LOG` (default: warn).
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
