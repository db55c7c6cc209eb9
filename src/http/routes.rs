//! Route table.

use actix_web::web;

use super::handlers;

/// Registers the API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/execute-query", web::post().to(handlers::execute_query))
            .route("/get-schema", web::post().to(handlers::get_schema)),
    )
    .route("/healthz", web::get().to(handlers::healthz));
}
