//! Request handlers for the gateway API.

use actix_web::{web, HttpResponse};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{
    ExecuteQueryRequest, ExecuteQueryResponse, GetSchemaRequest, GetSchemaResponse,
    HealthResponse,
};
use crate::error::Result;
use crate::gateway::Gateway;

/// Parses a JSON body, treating an empty or malformed body as an empty object.
///
/// Field-level type errors are absorbed by the request models.
fn parse_body<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    if body.is_empty() {
        return T::default();
    }
    serde_json::from_slice(body).unwrap_or_else(|e| {
        debug!("Ignoring unparsable request body: {}", e);
        T::default()
    })
}

/// POST /api/execute-query
pub async fn execute_query(gateway: web::Data<Gateway>, body: web::Bytes) -> Result<HttpResponse> {
    let request: ExecuteQueryRequest = parse_body(&body);
    let (details, sql) = request.validate()?;

    let result = gateway.execute_query(&details, &sql).await?;
    Ok(HttpResponse::Ok().json(ExecuteQueryResponse::from(result)))
}

/// POST /api/get-schema
pub async fn get_schema(gateway: web::Data<Gateway>, body: web::Bytes) -> Result<HttpResponse> {
    let request: GetSchemaRequest = parse_body(&body);
    let details = request.validate()?;

    let snapshot = gateway.fetch_schema(&details).await?;
    Ok(HttpResponse::Ok().json(GetSchemaResponse::from(snapshot)))
}

/// GET /healthz
pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::ok())
}
