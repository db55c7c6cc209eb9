//! Database abstraction layer for the gateway.
//!
//! A `Connector` opens one `Session` per request; the session runs the
//! metadata scan or a caller statement and is closed by its owner. The MySQL
//! implementation lives in `mysql`, an in-memory one in `mock`.

mod mock;
mod mysql;
mod schema;
mod types;

pub use mock::{MockConnector, MockStats};
pub use mysql::{MySqlConnector, MySqlSession, CONNECT_TIMEOUT};
pub use schema::{
    SchemaColumnRow, SchemaMap, SchemaSnapshot, COLUMNS_QUERY, PRIMARY_KEY_DESIGNATION,
    PRIMARY_KEY_MARKER,
};
pub use types::{ConnectionDetails, QueryData, QueryResult, ResultHeader, Row};

use crate::error::DriverError;
use async_trait::async_trait;

/// Result type for driver-level operations.
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Opens database sessions.
///
/// Implementations make a single attempt per call and never cache or reuse
/// sessions.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Opens a new session for the given credentials.
    async fn open(&self, details: &ConnectionDetails) -> DriverResult<Box<dyn Session>>;
}

/// An open handle to one database, owned by a single request.
#[async_trait]
pub trait Session: Send {
    /// Runs the column metadata scan for `database`, ordered by table name
    /// then ordinal position.
    async fn fetch_schema_rows(&mut self, database: &str) -> DriverResult<Vec<SchemaColumnRow>>;

    /// Executes a SQL statement verbatim.
    async fn execute(&mut self, sql: &str) -> DriverResult<QueryResult>;

    /// Closes the session. Consumes it, so a session closes at most once.
    async fn close(self: Box<Self>) -> DriverResult<()>;
}
