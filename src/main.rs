//! db-gateway - an HTTP gateway for ad-hoc MySQL queries and schema reads.

mod cli;

use std::sync::Arc;

use anyhow::Context;
use cli::Cli;
use db_gateway::config::Config;
use db_gateway::db::MockConnector;
use db_gateway::gateway::Gateway;
use db_gateway::{http, logging};
use tracing::{error, info, warn};

#[actix_web::main]
async fn main() {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    if let Err(e) = run().await {
        error!("{:#}", e);
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    let mut config = Config::load_from_file(&config_path)?;
    cli.apply_to(&mut config);
    config.validate()?;

    logging::init_logging(&config.logging);
    info!("Loaded config from: {}", config_path.display());

    let gateway = if cli.mock_db {
        warn!("Serving from the in-memory mock database");
        Gateway::new(Arc::new(MockConnector::demo()))
    } else {
        Gateway::mysql()
    };

    http::run(&config.server, gateway)
        .await
        .with_context(|| format!("Server on {} failed", config.server.bind_address()))
}
