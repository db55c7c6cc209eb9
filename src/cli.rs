//! Command-line argument parsing for the gateway binary.

use clap::Parser;
use db_gateway::config::Config;
use std::path::PathBuf;

/// HTTP gateway that runs SQL and reads schemas on caller-supplied MySQL servers.
#[derive(Parser, Debug)]
#[command(name = "db-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Interface to bind
    #[arg(short = 'H', long, env = "GATEWAY_HOST", value_name = "HOST")]
    pub host: Option<String>,

    /// Port to bind
    #[arg(short = 'p', long, env = "GATEWAY_PORT", value_name = "PORT")]
    pub port: Option<u16>,

    /// Worker threads (0 for one per core)
    #[arg(short = 'w', long, env = "GATEWAY_WORKERS", value_name = "N")]
    pub workers: Option<usize>,

    /// Config file path
    #[arg(short = 'c', long, env = "GATEWAY_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Serve from an in-memory mock database instead of MySQL
    #[arg(long)]
    pub mock_db: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Overrides file settings with those given on the command line.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(workers) = self.workers {
            config.server.workers = workers;
        }
        if let Some(log_file) = &self.log_file {
            config.logging.file = Some(log_file.clone());
        }
    }
}
