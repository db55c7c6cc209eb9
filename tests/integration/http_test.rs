//! End-to-end HTTP tests against the in-memory mock database.

use std::sync::Arc;

use actix_web::{test, web, App};
use db_gateway::db::MockConnector;
use db_gateway::gateway::Gateway;
use db_gateway::http;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn connection_details() -> Value {
    json!({
        "host": "localhost",
        "port": 3306,
        "database": "shop",
        "user": "app",
        "password": "secret"
    })
}

#[actix_web::test]
async fn test_demo_schema_over_http() {
    let connector = MockConnector::demo();
    let stats = connector.stats();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(Gateway::new(Arc::new(connector))))
            .configure(http::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/get-schema")
        .set_json(json!({ "connectionDetails": connection_details() }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["tableCount"], json!(2));
    assert_eq!(
        body["schema"]["orders"],
        json!(["id (int) 🔑", "user_id (int)", "total (decimal(10,2))"])
    );
    assert_eq!(stats.opened(), 1);
    assert_eq!(stats.closed(), 1);
}

#[actix_web::test]
async fn test_schema_keys_keep_first_seen_order() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(Gateway::new(Arc::new(MockConnector::demo()))))
            .configure(http::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/get-schema")
        .set_json(json!({ "connectionDetails": connection_details() }))
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let text = std::str::from_utf8(&body).unwrap();

    let orders = text.find("\"orders\"").unwrap();
    let users = text.find("\"users\"").unwrap();
    assert!(orders < users);
}

#[actix_web::test]
async fn test_mock_select_over_http() {
    let connector = MockConnector::demo();
    let stats = connector.stats();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(Gateway::new(Arc::new(connector))))
            .configure(http::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/execute-query")
        .set_json(json!({
            "connectionDetails": connection_details(),
            "sqlQuery": "SELECT * FROM users"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["rowCount"], json!(1));
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(stats.statements(), vec!["SELECT * FROM users"]);
}

#[actix_web::test]
async fn test_missing_fields_body_names_fields() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(Gateway::new(Arc::new(MockConnector::new()))))
            .configure(http::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/execute-query")
        .set_json(json!({ "sqlQuery": "SELECT 1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        json!("Missing required fields: connectionDetails")
    );
}

#[actix_web::test]
async fn test_unknown_route_is_404() {
    let app = test::init_service(App::new().configure(http::configure)).await;

    let req = test::TestRequest::get().uri("/api/nope").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 404);
}
