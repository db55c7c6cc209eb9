//! Statement execution against an open session.
//!
//! Statements run verbatim: no rewriting, no statement-type restriction.

use tracing::{debug, error};

use crate::db::{QueryResult, Session};
use crate::error::{GatewayError, Result};

/// Generic message when the driver reports a failure without one.
pub const EXECUTE_FALLBACK: &str = "Query execution failed";

/// Executes `sql` on `session`.
///
/// A blank statement fails with `MissingFields` without reaching the driver.
pub async fn execute(session: &mut dyn Session, sql: &str) -> Result<QueryResult> {
    if sql.trim().is_empty() {
        return Err(GatewayError::missing_fields(["sqlQuery"]));
    }

    match session.execute(sql).await {
        Ok(result) => {
            debug!("Statement returned {} rows", result.row_count);
            Ok(result)
        }
        Err(e) => {
            error!("Query execution error ({}): {}", e.kind.code(), e);
            Err(GatewayError::classify(&e, EXECUTE_FALLBACK))
        }
    }
}
