//! claw-applog - application log collector.
//!
//! Accepts log records over HTTP and stores them as one text file per
//! application per day.

use clap::Parser;
use claw_applog_server::cli::{Cli, Commands, LogFormat};
use claw_applog_server::LogServer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match cli.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }

    match cli.command {
        Commands::Serve(args) => {
            let config = args.resolve()?;
            info!("Starting claw-applog on {}", config.bind_addr);
            info!("  Upload:  POST http://{}/upload", config.bind_addr);
            info!("  Query:   GET  http://{}/query", config.bind_addr);
            info!("  Storage: {}", config.store.root.display());

            LogServer::new(config).run().await?;
        }
    }

    Ok(())
}
