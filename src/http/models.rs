//! Request and response bodies for the HTTP API.
//!
//! Request fields are all optional at the serde layer so that absent fields
//! surface as `MissingFields` rather than an extractor error. A field of the
//! wrong type is treated as absent without affecting its siblings.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::db::{ConnectionDetails, QueryData, QueryResult, SchemaMap, SchemaSnapshot};
use crate::error::{GatewayError, Result};

/// Deserializes a field, yielding `None` when its value has the wrong type.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Port as sent by clients: a number, or a numeric string from a form field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PortInput {
    Number(u16),
    Text(String),
}

impl PortInput {
    fn value(&self) -> Option<u16> {
        match self {
            Self::Number(port) => Some(*port),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// `connectionDetails` as received.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetailsInput {
    #[serde(default, deserialize_with = "lenient")]
    pub host: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub port: Option<PortInput>,
    #[serde(default, deserialize_with = "lenient")]
    pub database: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub user: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub password: Option<String>,
}

impl ConnectionDetailsInput {
    /// Fills absent fields with empty values; a port that is absent or out
    /// of range becomes 0.
    fn into_unchecked(self) -> ConnectionDetails {
        ConnectionDetails::new(
            self.host.unwrap_or_default(),
            self.port.as_ref().and_then(PortInput::value).unwrap_or(0),
            self.database.unwrap_or_default(),
            self.user.unwrap_or_default(),
            self.password.unwrap_or_default(),
        )
    }

    /// Converts to `ConnectionDetails`, naming every absent or empty field.
    pub fn into_details(self) -> Result<ConnectionDetails> {
        let details = self.into_unchecked();

        let missing = details.missing_fields();
        if missing.is_empty() {
            Ok(details)
        } else {
            Err(GatewayError::MissingFields(missing))
        }
    }
}

/// Body of `POST /api/execute-query`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteQueryRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub connection_details: Option<ConnectionDetailsInput>,
    #[serde(default, deserialize_with = "lenient")]
    pub sql_query: Option<String>,
}

impl ExecuteQueryRequest {
    /// Checks required fields before any connection attempt.
    ///
    /// Every missing field is named, from both `connectionDetails` and
    /// `sqlQuery`.
    pub fn validate(self) -> Result<(ConnectionDetails, String)> {
        let sql = self.sql_query.filter(|sql| !sql.trim().is_empty());
        let details = self
            .connection_details
            .map(ConnectionDetailsInput::into_unchecked);

        let mut missing = match &details {
            Some(details) => details.missing_fields(),
            None => vec!["connectionDetails".to_string()],
        };
        if sql.is_none() {
            missing.push("sqlQuery".to_string());
        }

        match (details, sql) {
            (Some(details), Some(sql)) if missing.is_empty() => Ok((details, sql)),
            _ => Err(GatewayError::MissingFields(missing)),
        }
    }
}

/// Body of `POST /api/get-schema`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSchemaRequest {
    #[serde(default, deserialize_with = "lenient")]
    pub connection_details: Option<ConnectionDetailsInput>,
}

impl GetSchemaRequest {
    /// Checks required fields before any connection attempt.
    pub fn validate(self) -> Result<ConnectionDetails> {
        self.connection_details
            .ok_or_else(|| GatewayError::missing_fields(["connectionDetails"]))?
            .into_details()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteQueryResponse {
    pub success: bool,
    pub data: QueryData,
    pub row_count: usize,
}

impl From<QueryResult> for ExecuteQueryResponse {
    fn from(result: QueryResult) -> Self {
        Self {
            success: true,
            data: result.data,
            row_count: result.row_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetSchemaResponse {
    pub success: bool,
    pub schema: SchemaMap,
    pub table_count: usize,
}

impl From<SchemaSnapshot> for GetSchemaResponse {
    fn from(snapshot: SchemaSnapshot) -> Self {
        Self {
            success: true,
            schema: snapshot.schema,
            table_count: snapshot.table_count,
        }
    }
}

/// Body of every failed response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: bool,
    pub status_code: u16,
    pub status_message: String,
    pub message: String,
}

impl From<&GatewayError> for ErrorResponse {
    fn from(error: &GatewayError) -> Self {
        let classified = error.to_classified();
        Self {
            error: true,
            status_code: classified.status_code,
            status_message: classified.message.clone(),
            message: classified.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
