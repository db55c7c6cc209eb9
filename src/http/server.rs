//! HTTP server lifecycle.

use std::io;

use actix_web::{middleware, web, App, HttpServer};
use tracing::info;

use super::routes;
use crate::config::ServerConfig;
use crate::gateway::Gateway;

/// Binds the configured address and serves until Ctrl+C.
pub async fn run(config: &ServerConfig, gateway: Gateway) -> io::Result<()> {
    let bind_addr = config.bind_address();
    let data = web::Data::new(gateway);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::new("%r %s %Dms"))
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind(&bind_addr)?;

    if config.workers > 0 {
        server = server.workers(config.workers);
    }

    info!("Listening on http://{}", bind_addr);
    let server = server.run();
    let handle = server.handle();
    let server_task = tokio::spawn(server);

    tokio::select! {
        result = server_task => {
            match result {
                Ok(outcome) => outcome?,
                Err(e) => return Err(io::Error::other(e)),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
            handle.stop(true).await;
        }
    }

    Ok(())
}
