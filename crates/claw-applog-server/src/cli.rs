//! Command-line argument parsing with clap.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Application log collector.
#[derive(Parser, Debug, Clone)]
#[command(name = "claw-applog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log output format.
    #[arg(long, value_enum, env = "CLAW_APPLOG_LOG_FORMAT", default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for the service's own logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the HTTP server.
    Serve(ServeArgs),
}

/// Arguments for `serve`.
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// TOML config file; flags below override its values.
    #[arg(short, long, env = "CLAW_APPLOG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on [default: 0.0.0.0:8080].
    #[arg(short, long, env = "CLAW_APPLOG_BIND")]
    pub bind: Option<SocketAddr>,

    /// Directory holding one subdirectory per application [default: logs].
    #[arg(short, long, env = "CLAW_APPLOG_ROOT")]
    pub root: Option<PathBuf>,
}

impl ServeArgs {
    /// Resolve the effective server configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the result
    /// fails validation.
    pub fn resolve(&self) -> ServerResult<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        if let Some(root) = &self.root {
            config.store.root.clone_from(root);
        }

        config.validate()?;
        Ok(config)
    }
}
