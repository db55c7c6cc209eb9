//! Scoped session lifecycle.
//!
//! `with_session` opens a session, runs one operation against it and closes
//! it on every exit path. Close failures are logged and dropped so the
//! operation's own outcome is what the caller sees.

use futures::future::BoxFuture;
use tracing::{error, info, warn};

use crate::db::{ConnectionDetails, Connector, Session};
use crate::error::{GatewayError, Result};

/// Opens a session for `details`.
///
/// Fails with `MissingFields` before any network attempt when a field is
/// empty. Driver failures are classified with `fallback` as the generic
/// message.
pub async fn open_session(
    connector: &dyn Connector,
    details: &ConnectionDetails,
    fallback: &str,
) -> Result<Box<dyn Session>> {
    let missing = details.missing_fields();
    if !missing.is_empty() {
        return Err(GatewayError::MissingFields(missing));
    }

    match connector.open(details).await {
        Ok(session) => {
            info!("Connected to database: {}", details.database);
            Ok(session)
        }
        Err(e) => {
            error!(
                "Connection to {} failed ({}): {}",
                details.display_string(),
                e.kind.code(),
                e
            );
            Err(GatewayError::classify(&e, fallback))
        }
    }
}

/// Closes a session, logging rather than returning any failure.
pub async fn teardown(session: Box<dyn Session>) {
    match session.close().await {
        Ok(()) => info!("Database connection closed"),
        Err(e) => warn!("Error closing connection: {}", e),
    }
}

/// Runs `body` against a freshly opened session, then closes it.
///
/// The session is closed exactly once whether `body` succeeds or fails, and
/// the result of `body` is returned untouched.
pub async fn with_session<T, F>(
    connector: &dyn Connector,
    details: &ConnectionDetails,
    fallback: &str,
    body: F,
) -> Result<T>
where
    F: for<'s> FnOnce(&'s mut dyn Session) -> BoxFuture<'s, Result<T>>,
{
    let mut session = open_session(connector, details, fallback).await?;
    let outcome = body(session.as_mut()).await;
    teardown(session).await;
    outcome
}
