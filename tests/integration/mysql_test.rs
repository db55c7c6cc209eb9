//! Tests against a live MySQL server.

use db_gateway::db::{ConnectionDetails, Connector, MySqlConnector, Session};
use db_gateway::error::GatewayError;
use db_gateway::gateway::Gateway;
use serde_json::json;

use super::common::test_mysql_details;

fn details_or_skip() -> Option<ConnectionDetails> {
    let details = test_mysql_details();
    if details.is_none() {
        eprintln!("Skipping test: GATEWAY_TEST_MYSQL_URL not set");
    }
    details
}

#[tokio::test]
async fn test_select_returns_rows() {
    let Some(details) = details_or_skip() else {
        return;
    };

    let result = Gateway::mysql()
        .execute_query(&details, "SELECT 1 AS x")
        .await
        .unwrap();

    assert_eq!(result.row_count, 1);
    assert_eq!(
        serde_json::to_value(&result.data).unwrap(),
        json!([{ "x": 1 }])
    );
}

#[tokio::test]
async fn test_columns_keep_select_order() {
    let Some(details) = details_or_skip() else {
        return;
    };

    let result = Gateway::mysql()
        .execute_query(&details, "SELECT 'b' AS zeta, 'a' AS alpha")
        .await
        .unwrap();

    let rows = result.as_rows().unwrap();
    let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha"]);
}

#[tokio::test]
async fn test_ddl_reports_zero_rows() {
    let Some(details) = details_or_skip() else {
        return;
    };

    let result = Gateway::mysql()
        .execute_query(&details, "CREATE TEMPORARY TABLE gateway_tmp (id INT)")
        .await
        .unwrap();

    assert_eq!(result.row_count, 0);
    assert!(result.as_rows().is_none());
}

#[tokio::test]
async fn test_syntax_error_is_generic_with_driver_message() {
    let Some(details) = details_or_skip() else {
        return;
    };

    let err = Gateway::mysql()
        .execute_query(&details, "SELEC 1")
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 500);
    assert!(err.to_string().contains("SQL syntax"), "{err}");
}

#[tokio::test]
async fn test_wrong_password_is_access_denied() {
    let Some(mut details) = details_or_skip() else {
        return;
    };
    details.password = format!("{}-wrong", details.password);

    let err = Gateway::mysql().fetch_schema(&details).await.unwrap_err();
    assert_eq!(err, GatewayError::AccessDenied);
}

#[tokio::test]
async fn test_unknown_database_is_not_found() {
    let Some(mut details) = details_or_skip() else {
        return;
    };
    details.database = "nonexistent_db_for_gateway_tests".to_string();

    let err = Gateway::mysql().fetch_schema(&details).await.unwrap_err();
    assert_eq!(err, GatewayError::DatabaseNotFound);
}

#[tokio::test]
async fn test_schema_fetch_is_repeatable() {
    let Some(details) = details_or_skip() else {
        return;
    };
    let gateway = Gateway::mysql();

    let first = gateway.fetch_schema(&details).await.unwrap();
    let second = gateway.fetch_schema(&details).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.table_count, first.schema.table_count());
}

#[tokio::test]
async fn test_year_column_decodes_as_number() {
    let Some(details) = details_or_skip() else {
        return;
    };
    // Temporary tables live only as long as one session.
    let mut session = MySqlConnector::new().open(&details).await.unwrap();

    session
        .execute("CREATE TEMPORARY TABLE gateway_years (y YEAR)")
        .await
        .unwrap();
    session
        .execute("INSERT INTO gateway_years VALUES (2024)")
        .await
        .unwrap();
    let result = session.execute("SELECT y FROM gateway_years").await.unwrap();
    session.close().await.unwrap();

    assert_eq!(
        serde_json::to_value(&result.data).unwrap(),
        json!([{ "y": 2024 }])
    );
}
