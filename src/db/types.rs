//! Request and result types for the gateway.
//!
//! Defines the connection credentials supplied with each request and the
//! structures used to represent statement results from the database.

use serde::Serialize;
use std::fmt;

/// Credentials for one target database, supplied fresh on every request.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionDetails {
    /// Database host.
    pub host: String,

    /// Database port.
    pub port: u16,

    /// Database name.
    pub database: String,

    /// Database user.
    pub user: String,

    /// Database password.
    pub password: String,
}

impl ConnectionDetails {
    /// Creates connection details from the five required fields.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        database: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            database: database.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    /// Returns the wire names of fields that are empty.
    ///
    /// A port of 0 counts as empty.
    pub fn missing_fields(&self) -> Vec<String> {
        [
            ("host", self.host.trim().is_empty()),
            ("port", self.port == 0),
            ("database", self.database.trim().is_empty()),
            ("user", self.user.trim().is_empty()),
            ("password", self.password.is_empty()),
        ]
        .into_iter()
        .filter(|(_, missing)| *missing)
        .map(|(name, _)| format!("connectionDetails.{name}"))
        .collect()
    }

    /// Returns a display-safe string (no password) for logging.
    pub fn display_string(&self) -> String {
        format!("{} @ {}:{} as {}", self.database, self.host, self.port, self.user)
    }
}

impl fmt::Debug for ConnectionDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionDetails")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A row of data, keyed by column name in column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Represents the result of executing a SQL statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Rows for statements that produce a row set, a header otherwise.
    pub data: QueryData,

    /// Number of rows in `data`, 0 when the statement produced no row set.
    pub row_count: usize,
}

impl QueryResult {
    /// Creates a result for a statement that produced a row set.
    pub fn rows(rows: Vec<Row>) -> Self {
        let row_count = rows.len();
        Self {
            data: QueryData::Rows(rows),
            row_count,
        }
    }

    /// Creates a result for a statement that produced no row set.
    pub fn header(header: ResultHeader) -> Self {
        Self {
            data: QueryData::Header(header),
            row_count: 0,
        }
    }

    /// Returns the rows, if the statement produced a row set.
    pub fn as_rows(&self) -> Option<&[Row]> {
        match &self.data {
            QueryData::Rows(rows) => Some(rows),
            QueryData::Header(_) => None,
        }
    }
}

/// Driver output for a statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryData {
    /// Result of a row-producing statement (SELECT, SHOW, ...).
    Rows(Vec<Row>),

    /// Result of a statement that only reports affected rows (DML, DDL).
    Header(ResultHeader),
}

/// Outcome of a statement that does not produce a row set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultHeader {
    /// Rows inserted, updated or deleted.
    pub affected_rows: u64,

    /// Last AUTO_INCREMENT value generated, 0 if none.
    pub insert_id: u64,
}
