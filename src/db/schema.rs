//! Database schema types for the gateway.
//!
//! Raw `information_schema.COLUMNS` rows are folded into a `SchemaMap`: table
//! names in first-seen order, each with its column descriptors in ordinal
//! order.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Metadata query for every column of one schema.
pub const COLUMNS_QUERY: &str = r#"
    SELECT
        TABLE_NAME,
        COLUMN_NAME,
        COLUMN_TYPE,
        IS_NULLABLE,
        COLUMN_KEY
    FROM information_schema.COLUMNS
    WHERE TABLE_SCHEMA = ?
    ORDER BY TABLE_NAME, ORDINAL_POSITION
"#;

/// `COLUMN_KEY` value for primary key columns.
pub const PRIMARY_KEY_DESIGNATION: &str = "PRI";

/// Suffix appended to primary key column descriptors.
pub const PRIMARY_KEY_MARKER: &str = "🔑";

/// One row of the metadata scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaColumnRow {
    pub table_name: String,
    pub column_name: String,
    pub column_type: String,
    pub is_nullable: String,
    pub column_key: String,
}

impl SchemaColumnRow {
    /// Creates a metadata row from its five columns.
    pub fn new(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        column_type: impl Into<String>,
        is_nullable: impl Into<String>,
        column_key: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            column_type: column_type.into(),
            is_nullable: is_nullable.into(),
            column_key: column_key.into(),
        }
    }

    pub fn is_primary_key(&self) -> bool {
        self.column_key == PRIMARY_KEY_DESIGNATION
    }

    /// Formats the column as `name (type)`, marking primary keys.
    pub fn descriptor(&self) -> String {
        if self.is_primary_key() {
            format!(
                "{} ({}) {}",
                self.column_name, self.column_type, PRIMARY_KEY_MARKER
            )
        } else {
            format!("{} ({})", self.column_name, self.column_type)
        }
    }
}

/// Table name to column descriptors, in first-seen table order.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMap {
    tables: Vec<(String, Vec<String>)>,
}

impl SchemaMap {
    /// Folds an ordered metadata scan into a schema map.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = SchemaColumnRow>,
    {
        let mut tables: Vec<(String, Vec<String>)> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for row in rows {
            let descriptor = row.descriptor();
            let index = *positions.entry(row.table_name.clone()).or_insert_with(|| {
                tables.push((row.table_name, Vec::new()));
                tables.len() - 1
            });
            tables[index].1.push(descriptor);
        }

        Self { tables }
    }

    /// Number of distinct tables.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Column descriptors for a table, if present.
    pub fn get(&self, table: &str) -> Option<&[String]> {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, columns)| columns.as_slice())
    }

    /// Table names in first-seen order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(name, _)| name.as_str())
    }

    /// Tables with their column descriptors, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.tables
            .iter()
            .map(|(name, columns)| (name.as_str(), columns.as_slice()))
    }
}

impl Serialize for SchemaMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.tables.len()))?;
        for (name, columns) in self.iter() {
            map.serialize_entry(name, columns)?;
        }
        map.end()
    }
}

/// A schema map together with its table count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSnapshot {
    pub schema: SchemaMap,
    pub table_count: usize,
}

impl From<SchemaMap> for SchemaSnapshot {
    fn from(schema: SchemaMap) -> Self {
        let table_count = schema.table_count();
        Self {
            schema,
            table_count,
        }
    }
}
