mod chat_cmd;
mod config;
mod history_cmd;
mod terminal_output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use config::Config;

#[derive(Parser)]
#[command(name = "amiga")]
#[command(about = "Amiga — a terminal chat companion")]
#[command(version)]
struct Cli {
    /// Directory holding the saved conversation (defaults to ~/.amiga)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with your companion
    Chat {
        /// Companion persona id
        #[arg(short, long, default_value = "yara")]
        companion: String,
    },
    /// Show the saved conversation log
    History,
    /// Delete the saved conversation log
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = Config::from_env();

    // Logs go to stderr so they never interleave with the chat thread.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    match cli.command {
        Commands::Chat { companion } => chat_cmd::run_chat(&config, &companion).await,
        Commands::History => history_cmd::run_history(&config).await,
        Commands::Reset => history_cmd::run_reset(&config).await,
    }
}
