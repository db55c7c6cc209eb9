//! Schema introspection against an open session.

use tracing::{error, info};

use crate::db::{SchemaMap, SchemaSnapshot, Session};
use crate::error::{GatewayError, Result};

/// Generic message when the driver reports a failure without one.
pub const SCHEMA_FALLBACK: &str = "Schema fetch failed";

/// Runs the metadata scan for `database` and folds it into a schema map.
pub async fn fetch_schema(session: &mut dyn Session, database: &str) -> Result<SchemaSnapshot> {
    let rows = session.fetch_schema_rows(database).await.map_err(|e| {
        error!("Schema fetch error ({}): {}", e.kind.code(), e);
        GatewayError::classify(&e, SCHEMA_FALLBACK)
    })?;

    let snapshot = SchemaSnapshot::from(SchemaMap::from_rows(rows));
    info!(
        "Schema fetched successfully: {} tables",
        snapshot.table_count
    );

    Ok(snapshot)
}
