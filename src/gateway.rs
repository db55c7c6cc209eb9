//! The two gateway operations.
//!
//! Each call validates its input, opens a fresh session through the
//! configured connector, runs one operation and closes the session. Nothing
//! is shared between calls beyond the connector itself.

use std::sync::Arc;

use crate::connection::with_session;
use crate::db::{ConnectionDetails, Connector, MySqlConnector, QueryResult, SchemaSnapshot};
use crate::error::{GatewayError, Result};
use crate::query::{self, EXECUTE_FALLBACK, SCHEMA_FALLBACK};

/// Entry point for schema fetches and statement execution.
#[derive(Clone)]
pub struct Gateway {
    connector: Arc<dyn Connector>,
}

impl Gateway {
    /// Creates a gateway over the given connector.
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }

    /// Creates a gateway that connects to MySQL servers.
    pub fn mysql() -> Self {
        Self::new(Arc::new(MySqlConnector::new()))
    }

    /// Executes `sql` against the database described by `details`.
    pub async fn execute_query(&self, details: &ConnectionDetails, sql: &str) -> Result<QueryResult> {
        if sql.trim().is_empty() {
            return Err(GatewayError::missing_fields(["sqlQuery"]));
        }

        let sql = sql.to_owned();
        with_session(
            self.connector.as_ref(),
            details,
            EXECUTE_FALLBACK,
            move |session| Box::pin(async move { query::execute(session, &sql).await }),
        )
        .await
    }

    /// Fetches the table/column layout of `details.database`.
    pub async fn fetch_schema(&self, details: &ConnectionDetails) -> Result<SchemaSnapshot> {
        let database = details.database.clone();
        with_session(
            self.connector.as_ref(),
            details,
            SCHEMA_FALLBACK,
            move |session| Box::pin(async move { query::fetch_schema(session, &database).await }),
        )
        .await
    }
}
