//! Error types for the gateway.
//!
//! `GatewayError` is the outward taxonomy every request resolves to.
//! `DriverError` is what the database layer reports; [`GatewayError::classify`]
//! is the only place one becomes the other.

use serde::Serialize;
use thiserror::Error;

/// Fixed message for a refused connection.
pub const CONNECTION_REFUSED_MESSAGE: &str =
    "Database connection refused. Is the database running?";

/// Fixed message for rejected credentials.
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied. Check your credentials.";

/// Fixed message for an unknown database.
pub const DATABASE_NOT_FOUND_MESSAGE: &str = "Database not found.";

/// Outward-facing error category for a gateway request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Required request fields were absent or empty.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Nothing is listening at the target host/port.
    #[error("{}", CONNECTION_REFUSED_MESSAGE)]
    ConnectionRefused,

    /// The server rejected the supplied user/password.
    #[error("{}", ACCESS_DENIED_MESSAGE)]
    AccessDenied,

    /// The named database does not exist on the server.
    #[error("{}", DATABASE_NOT_FOUND_MESSAGE)]
    DatabaseNotFound,

    /// Anything else, carrying the driver message or an operation fallback.
    #[error("{0}")]
    Generic(String),
}

impl GatewayError {
    /// Creates a missing-fields error naming each absent field.
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingFields(fields.into_iter().map(Into::into).collect())
    }

    /// Creates a generic error with the given message.
    pub fn generic(msg: impl Into<String>) -> Self {
        Self::Generic(msg.into())
    }

    /// Maps a driver failure onto the taxonomy.
    ///
    /// Total over every driver error: codes without a dedicated category fall
    /// through to `Generic`, using the driver message when it has one and
    /// `fallback` otherwise.
    pub fn classify(error: &DriverError, fallback: &str) -> Self {
        match error.kind {
            DriverErrorKind::ConnectionRefused => Self::ConnectionRefused,
            DriverErrorKind::AccessDenied => Self::AccessDenied,
            DriverErrorKind::UnknownDatabase => Self::DatabaseNotFound,
            DriverErrorKind::TimedOut | DriverErrorKind::Other => {
                let message = error.message.trim();
                if message.is_empty() {
                    Self::generic(fallback)
                } else {
                    Self::generic(message)
                }
            }
        }
    }

    /// Returns the HTTP status code for this category.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingFields(_) => 400,
            Self::ConnectionRefused => 503,
            Self::AccessDenied => 401,
            Self::DatabaseNotFound => 404,
            Self::Generic(_) => 500,
        }
    }

    /// Returns the error category as a string for logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::MissingFields(_) => "MissingFields",
            Self::ConnectionRefused => "ConnectionRefused",
            Self::AccessDenied => "AccessDenied",
            Self::DatabaseNotFound => "DatabaseNotFound",
            Self::Generic(_) => "Generic",
        }
    }

    /// Flattens the error into its status code and message.
    pub fn to_classified(&self) -> ClassifiedError {
        ClassifiedError {
            status_code: self.status_code(),
            message: self.to_string(),
        }
    }
}

/// Status code and message pair returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedError {
    pub status_code: u16,
    pub message: String,
}

/// Result type alias using GatewayError.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failure code reported by the database layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverErrorKind {
    /// TCP connect was refused.
    ConnectionRefused,
    /// Server error 1045.
    AccessDenied,
    /// Server error 1049.
    UnknownDatabase,
    /// The connect timeout elapsed.
    TimedOut,
    /// Any other driver or server failure.
    Other,
}

impl DriverErrorKind {
    /// Returns the conventional code name for logging.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConnectionRefused => "ECONNREFUSED",
            Self::AccessDenied => "ER_ACCESS_DENIED_ERROR",
            Self::UnknownDatabase => "ER_BAD_DB_ERROR",
            Self::TimedOut => "ETIMEDOUT",
            Self::Other => "UNKNOWN",
        }
    }
}

/// A failure reported by a database session or connector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DriverError {
    pub kind: DriverErrorKind,
    pub message: String,
}

impl DriverError {
    /// Creates a driver error of the given kind.
    pub fn new(kind: DriverErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an unclassified driver error.
    pub fn other(message: impl Into<String>) -> Self {
        Self::new(DriverErrorKind::Other, message)
    }
}

/// Errors raised while loading startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error in {path}:\n  {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Configuration error: {0}")]
    Invalid(String),
}
