//! Connection failure tests against the real MySQL connector.
//!
//! These need no database: they target a loopback port nothing listens on.

use actix_web::{test, web, App};
use db_gateway::error::GatewayError;
use db_gateway::gateway::Gateway;
use db_gateway::http;
use serde_json::{json, Value};

use super::common::refused_details;

#[tokio::test(flavor = "current_thread")]
async fn test_refused_connection_is_classified() {
    let gateway = Gateway::mysql();

    let err = gateway.fetch_schema(&refused_details()).await.unwrap_err();

    assert_eq!(err, GatewayError::ConnectionRefused);
    assert_eq!(err.status_code(), 503);
}

#[tokio::test(flavor = "current_thread")]
async fn test_refused_connection_on_execute() {
    let gateway = Gateway::mysql();

    let err = gateway
        .execute_query(&refused_details(), "SELECT 1")
        .await
        .unwrap_err();

    assert_eq!(err, GatewayError::ConnectionRefused);
}

#[actix_web::test]
async fn test_refused_connection_over_http() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(Gateway::mysql()))
            .configure(http::configure),
    )
    .await;

    let details = refused_details();
    let req = test::TestRequest::post()
        .uri("/api/get-schema")
        .set_json(json!({
            "connectionDetails": {
                "host": details.host,
                "port": details.port,
                "database": details.database,
                "user": details.user,
                "password": details.password
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 503);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        json!("Database connection refused. Is the database running?")
    );
}
