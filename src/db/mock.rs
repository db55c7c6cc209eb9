//! Mock connector for testing.
//!
//! Provides in-memory sessions with scripted results and failures, and counts
//! how often sessions are opened and closed.

use super::{
    Connector, ConnectionDetails, DriverResult, QueryResult, ResultHeader, Row, SchemaColumnRow,
    Session,
};
use crate::error::DriverError;
use async_trait::async_trait;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Counters shared between a `MockConnector` and the sessions it opens.
#[derive(Debug, Default)]
pub struct MockStats {
    opened: AtomicUsize,
    closed: AtomicUsize,
    statements: Mutex<Vec<String>>,
}

impl MockStats {
    /// Number of `open` calls, including failed ones.
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    /// Number of `close` calls, including failed ones.
    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }

    /// Statements executed so far, in order.
    pub fn statements(&self) -> Vec<String> {
        self.statements
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record(&self, sql: &str) {
        self.statements
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(sql.to_string());
    }
}

#[derive(Debug, Clone, Default)]
struct Script {
    schema_rows: Vec<SchemaColumnRow>,
    query_result: Option<QueryResult>,
    open_error: Option<DriverError>,
    schema_error: Option<DriverError>,
    query_error: Option<DriverError>,
    close_error: Option<DriverError>,
}

/// A connector whose sessions return predefined results.
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    script: Script,
    stats: Arc<MockStats>,
}

impl MockConnector {
    /// Creates a mock connector with an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock connector with a small `users`/`orders` schema.
    pub fn demo() -> Self {
        Self::new().with_schema_rows(vec![
            SchemaColumnRow::new("orders", "id", "int", "NO", "PRI"),
            SchemaColumnRow::new("orders", "user_id", "int", "NO", "MUL"),
            SchemaColumnRow::new("orders", "total", "decimal(10,2)", "NO", ""),
            SchemaColumnRow::new("users", "id", "int", "NO", "PRI"),
            SchemaColumnRow::new("users", "email", "varchar(255)", "NO", "UNI"),
            SchemaColumnRow::new("users", "name", "varchar(50)", "YES", ""),
        ])
    }

    /// Sets the rows returned by the metadata scan.
    pub fn with_schema_rows(mut self, rows: Vec<SchemaColumnRow>) -> Self {
        self.script.schema_rows = rows;
        self
    }

    /// Sets the result returned for every statement.
    pub fn with_query_result(mut self, result: QueryResult) -> Self {
        self.script.query_result = Some(result);
        self
    }

    /// Makes `open` fail with the given error.
    pub fn failing_open(mut self, error: DriverError) -> Self {
        self.script.open_error = Some(error);
        self
    }

    /// Makes the metadata scan fail with the given error.
    pub fn failing_schema(mut self, error: DriverError) -> Self {
        self.script.schema_error = Some(error);
        self
    }

    /// Makes every statement fail with the given error.
    pub fn failing_query(mut self, error: DriverError) -> Self {
        self.script.query_error = Some(error);
        self
    }

    /// Makes `close` fail with the given error.
    pub fn failing_close(mut self, error: DriverError) -> Self {
        self.script.close_error = Some(error);
        self
    }

    /// Returns the shared counters.
    pub fn stats(&self) -> Arc<MockStats> {
        Arc::clone(&self.stats)
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn open(&self, _details: &ConnectionDetails) -> DriverResult<Box<dyn Session>> {
        self.stats.opened.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = &self.script.open_error {
            return Err(error.clone());
        }

        Ok(Box::new(MockSession {
            script: self.script.clone(),
            stats: Arc::clone(&self.stats),
        }))
    }
}

struct MockSession {
    script: Script,
    stats: Arc<MockStats>,
}

#[async_trait]
impl Session for MockSession {
    async fn fetch_schema_rows(&mut self, _database: &str) -> DriverResult<Vec<SchemaColumnRow>> {
        match &self.script.schema_error {
            Some(error) => Err(error.clone()),
            None => Ok(self.script.schema_rows.clone()),
        }
    }

    async fn execute(&mut self, sql: &str) -> DriverResult<QueryResult> {
        self.stats.record(sql);

        if let Some(error) = &self.script.query_error {
            return Err(error.clone());
        }
        if let Some(result) = &self.script.query_result {
            return Ok(result.clone());
        }

        if sql.trim_start().to_uppercase().starts_with("SELECT") {
            let mut row = Row::new();
            row.insert("result".to_string(), json!(format!("Mock result for: {sql}")));
            Ok(QueryResult::rows(vec![row]))
        } else {
            Ok(QueryResult::header(ResultHeader::default()))
        }
    }

    async fn close(self: Box<Self>) -> DriverResult<()> {
        self.stats.closed.fetch_add(1, Ordering::SeqCst);

        match &self.script.close_error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}
