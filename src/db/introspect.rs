//! Live schema introspection.
//!
//! Column metadata is read from `information_schema` on every table
//! selection. Nothing is cached: a schema change between two interactions
//! must be visible on the next render pass, so staleness is the caller's
//! only correctness risk to manage, and it manages it by re-invoking.

use crate::error::{AdminError, AdminResult};
use crate::models::{ColumnSchema, KeyRole, TableSchema};
use sqlx::mysql::{MySqlConnection, MySqlRow};
use sqlx::Row;
use tracing::debug;

const DESCRIBE_COLUMNS: &str = r#"
SELECT
    CONVERT(COLUMN_NAME USING utf8) AS COLUMN_NAME,
    CONVERT(COLUMN_TYPE USING utf8) AS COLUMN_TYPE,
    CONVERT(IS_NULLABLE USING utf8) AS IS_NULLABLE,
    CONVERT(COLUMN_DEFAULT USING utf8) AS COLUMN_DEFAULT,
    CONVERT(COLUMN_KEY USING utf8) AS COLUMN_KEY,
    CONVERT(EXTRA USING utf8) AS EXTRA
FROM information_schema.columns
WHERE TABLE_NAME = ? AND TABLE_SCHEMA = DATABASE()
ORDER BY ORDINAL_POSITION
"#;

const LIST_TABLES: &str = r#"
SELECT CONVERT(TABLE_NAME USING utf8) AS TABLE_NAME
FROM information_schema.tables
WHERE TABLE_SCHEMA = DATABASE() AND TABLE_TYPE = 'BASE TABLE'
ORDER BY TABLE_NAME
"#;

/// Safely get a string from a MySQL row.
/// MySQL may return VARBINARY instead of VARCHAR depending on charset configuration.
fn get_string(row: &MySqlRow, column: &str) -> String {
    row.try_get::<String, _>(column)
        .ok()
        .or_else(|| {
            row.try_get::<Vec<u8>, _>(column)
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
        })
        .unwrap_or_default()
}

/// Safely get an optional string from a MySQL row.
fn get_optional_string(row: &MySqlRow, column: &str) -> Option<String> {
    row.try_get::<Option<String>, _>(column)
        .ok()
        .flatten()
        .or_else(|| {
            row.try_get::<Option<Vec<u8>>, _>(column)
                .ok()
                .flatten()
                .and_then(|bytes| String::from_utf8(bytes).ok())
        })
}

/// Describe a table's columns from the live catalog.
///
/// Fails with a schema error when the table does not exist in the connected
/// database (or the connection lacks the privilege to see it).
pub async fn describe(conn: &mut MySqlConnection, table_name: &str) -> AdminResult<TableSchema> {
    let rows = sqlx::query(DESCRIBE_COLUMNS)
        .bind(table_name)
        .fetch_all(&mut *conn)
        .await?;

    if rows.is_empty() {
        return Err(AdminError::schema(
            "Tabelle nicht gefunden",
            table_name.to_string(),
        ));
    }

    let columns = rows
        .iter()
        .map(|row| {
            let name = get_string(row, "COLUMN_NAME");
            let raw_type = get_string(row, "COLUMN_TYPE");
            let nullable = get_string(row, "IS_NULLABLE") == "YES";
            let key_role = if get_string(row, "COLUMN_KEY") == "PRI" {
                KeyRole::Primary
            } else {
                KeyRole::None
            };

            let mut col =
                ColumnSchema::new(name, raw_type, nullable).with_key_role(key_role);
            if let Some(default) = get_optional_string(row, "COLUMN_DEFAULT") {
                col = col.with_default(default);
            }
            if let Some(extra) = get_optional_string(row, "EXTRA") {
                if !extra.is_empty() {
                    col = col.with_extra(extra);
                }
            }
            col
        })
        .collect::<Vec<_>>();

    debug!(
        table = table_name,
        columns = columns.len(),
        "Described table"
    );

    Ok(TableSchema {
        table_name: table_name.to_string(),
        columns,
    })
}

/// List the browsable base tables of the connected database.
pub async fn list_tables(conn: &mut MySqlConnection) -> AdminResult<Vec<String>> {
    let rows = sqlx::query(LIST_TABLES).fetch_all(&mut *conn).await?;
    let tables = rows
        .iter()
        .map(|row| get_string(row, "TABLE_NAME"))
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>();
    debug!(count = tables.len(), "Listed tables");
    Ok(tables)
}
