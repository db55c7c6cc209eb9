//! MySQL session implementation.
//!
//! Provides `MySqlConnector`, which opens one `sqlx::MySqlConnection` per
//! request, and `MySqlSession`, which implements the `Session` trait on top of
//! it.

use crate::db::{
    Connector, ConnectionDetails, DriverResult, QueryResult, ResultHeader, Row, SchemaColumnRow,
    Session, COLUMNS_QUERY,
};
use crate::error::{DriverError, DriverErrorKind};
use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlDatabaseError, MySqlRow};
use sqlx::{
    Column as SqlxColumn, ConnectOptions, Connection, Executor, Row as SqlxRow, Statement, TypeInfo,
    ValueRef,
};
use std::time::Duration;
use tracing::debug;

/// Upper bound on establishing a session. Not configurable.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Server error number for rejected credentials.
const ER_ACCESS_DENIED_ERROR: u16 = 1045;

/// Server error number for an unknown database.
const ER_BAD_DB_ERROR: u16 = 1049;

/// Opens MySQL sessions, one connection per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlConnector;

impl MySqlConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    async fn open(&self, details: &ConnectionDetails) -> DriverResult<Box<dyn Session>> {
        let options = connect_options(details);

        debug!("Connecting to {}", details.display_string());

        let conn = tokio::time::timeout(CONNECT_TIMEOUT, options.connect())
            .await
            .map_err(|_| DriverError::new(DriverErrorKind::TimedOut, "connect ETIMEDOUT"))?
            .map_err(map_driver_error)?;

        Ok(Box::new(MySqlSession { conn }))
    }
}

/// A single open MySQL connection.
#[derive(Debug)]
pub struct MySqlSession {
    conn: MySqlConnection,
}

#[async_trait]
impl Session for MySqlSession {
    async fn fetch_schema_rows(&mut self, database: &str) -> DriverResult<Vec<SchemaColumnRow>> {
        let rows = sqlx::query(COLUMNS_QUERY)
            .bind(database)
            .fetch_all(&mut self.conn)
            .await
            .map_err(map_driver_error)?;

        rows.iter()
            .map(|row| {
                Ok(SchemaColumnRow {
                    table_name: text_column(row, 0)?,
                    column_name: text_column(row, 1)?,
                    column_type: text_column(row, 2)?,
                    is_nullable: text_column(row, 3)?,
                    column_key: text_column(row, 4)?,
                })
            })
            .collect()
    }

    async fn execute(&mut self, sql: &str) -> DriverResult<QueryResult> {
        // A statement yields a row set iff its prepared form describes columns.
        let statement = (&mut self.conn)
            .prepare(sql)
            .await
            .map_err(map_driver_error)?;
        let yields_rows = !statement.columns().is_empty();

        if yields_rows {
            let rows = sqlx::query(sql)
                .fetch_all(&mut self.conn)
                .await
                .map_err(map_driver_error)?;
            Ok(QueryResult::rows(rows.iter().map(convert_row).collect()))
        } else {
            let done = sqlx::query(sql)
                .execute(&mut self.conn)
                .await
                .map_err(map_driver_error)?;
            Ok(QueryResult::header(ResultHeader {
                affected_rows: done.rows_affected(),
                insert_id: done.last_insert_id(),
            }))
        }
    }

    async fn close(self: Box<Self>) -> DriverResult<()> {
        self.conn.close().await.map_err(map_driver_error)
    }
}

/// Builds driver options from request credentials.
fn connect_options(details: &ConnectionDetails) -> MySqlConnectOptions {
    MySqlConnectOptions::new()
        .host(&details.host)
        .port(details.port)
        .username(&details.user)
        .password(&details.password)
        .database(&details.database)
}

/// Maps a sqlx error to a driver error code.
fn map_driver_error(error: sqlx::Error) -> DriverError {
    if let sqlx::Error::Io(io_error) = &error {
        if io_error.kind() == std::io::ErrorKind::ConnectionRefused {
            return DriverError::new(DriverErrorKind::ConnectionRefused, error.to_string());
        }
    }

    if let Some(db_error) = error.as_database_error() {
        let number = db_error
            .try_downcast_ref::<MySqlDatabaseError>()
            .map(MySqlDatabaseError::number);
        let kind = match number {
            Some(ER_ACCESS_DENIED_ERROR) => DriverErrorKind::AccessDenied,
            Some(ER_BAD_DB_ERROR) => DriverErrorKind::UnknownDatabase,
            _ => DriverErrorKind::Other,
        };
        return DriverError::new(kind, db_error.message());
    }

    match error {
        sqlx::Error::PoolTimedOut => DriverError::new(DriverErrorKind::TimedOut, error.to_string()),
        _ => DriverError::other(error.to_string()),
    }
}

/// Reads a metadata column as text.
///
/// Some servers report `information_schema` columns with a binary collation,
/// so fall back to raw bytes.
fn text_column(row: &MySqlRow, index: usize) -> DriverResult<String> {
    if let Ok(value) = row.try_get::<Option<String>, _>(index) {
        return Ok(value.unwrap_or_default());
    }

    row.try_get::<Option<Vec<u8>>, _>(index)
        .map(|bytes| {
            bytes
                .map(|b| String::from_utf8_lossy(&b).into_owned())
                .unwrap_or_default()
        })
        .map_err(map_driver_error)
}

/// Converts a MySqlRow to a column-name keyed row.
fn convert_row(row: &MySqlRow) -> Row {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| {
            (
                col.name().to_string(),
                convert_value(row, i, col.type_info().name()),
            )
        })
        .collect()
}

/// Converts a single column value from a MySqlRow to JSON.
fn convert_value(row: &MySqlRow, index: usize, type_name: &str) -> JsonValue {
    match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return JsonValue::Null,
        Err(_) => return JsonValue::Null,
        _ => {}
    }

    match type_name {
        "BOOLEAN" => row
            .try_get::<bool, _>(index)
            .map(JsonValue::Bool)
            .unwrap_or_else(|_| decode_fallback(row, index)),

        "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => row
            .try_get::<i64, _>(index)
            .map(|v| json!(v))
            .unwrap_or_else(|_| decode_fallback(row, index)),

        "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
        | "BIGINT UNSIGNED" => row
            .try_get::<u64, _>(index)
            .map(|v| json!(v))
            .unwrap_or_else(|_| decode_fallback(row, index)),

        "YEAR" => row
            .try_get::<u16, _>(index)
            .map(|v| json!(v))
            .or_else(|_| row.try_get::<i64, _>(index).map(|v| json!(v)))
            .unwrap_or_else(|_| decode_fallback(row, index)),

        "FLOAT" => row
            .try_get::<f32, _>(index)
            .map(|v| json!(v as f64))
            .unwrap_or_else(|_| decode_fallback(row, index)),

        "DOUBLE" => row
            .try_get::<f64, _>(index)
            .map(|v| json!(v))
            .unwrap_or_else(|_| decode_fallback(row, index)),

        // Rendered as strings to keep full precision.
        "DECIMAL" => row
            .try_get::<rust_decimal::Decimal, _>(index)
            .map(|v| JsonValue::String(v.to_string()))
            .unwrap_or_else(|_| decode_fallback(row, index)),

        "DATE" => row
            .try_get::<chrono::NaiveDate, _>(index)
            .map(|v| json!(v))
            .unwrap_or_else(|_| decode_fallback(row, index)),

        "TIME" => row
            .try_get::<chrono::NaiveTime, _>(index)
            .map(|v| json!(v))
            .unwrap_or_else(|_| decode_fallback(row, index)),

        "DATETIME" => row
            .try_get::<chrono::NaiveDateTime, _>(index)
            .map(|v| json!(v))
            .unwrap_or_else(|_| decode_fallback(row, index)),

        "TIMESTAMP" => row
            .try_get::<chrono::DateTime<chrono::Utc>, _>(index)
            .map(|v| json!(v))
            .unwrap_or_else(|_| decode_fallback(row, index)),

        "JSON" => row
            .try_get::<JsonValue, _>(index)
            .unwrap_or_else(|_| decode_fallback(row, index)),

        "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" | "BIT"
        | "GEOMETRY" => row
            .try_get::<Vec<u8>, _>(index)
            .map(bytes_value)
            .unwrap_or_else(|_| decode_fallback(row, index)),

        _ => decode_fallback(row, index),
    }
}

/// Tries progressively looser decodings for types without a dedicated arm.
fn decode_fallback(row: &MySqlRow, index: usize) -> JsonValue {
    if let Ok(v) = row.try_get::<String, _>(index) {
        return JsonValue::String(v);
    }
    if let Ok(v) = row.try_get::<i64, _>(index) {
        return json!(v);
    }
    if let Ok(v) = row.try_get::<u64, _>(index) {
        return json!(v);
    }
    if let Ok(v) = row.try_get::<f64, _>(index) {
        return json!(v);
    }

    row.try_get_unchecked::<Vec<u8>, _>(index)
        .map(|bytes| match String::from_utf8(bytes) {
            Ok(text) => JsonValue::String(text),
            Err(e) => bytes_value(e.into_bytes()),
        })
        .unwrap_or(JsonValue::Null)
}

fn bytes_value(bytes: Vec<u8>) -> JsonValue {
    JsonValue::Array(bytes.into_iter().map(JsonValue::from).collect())
}
