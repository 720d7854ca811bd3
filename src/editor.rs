//! Write-path operations: guarded insert, update, and delete.
//!
//! Every write goes through the same gates, in order: the session must be
//! privileged, the addressed table must have a primary key (update/delete),
//! key values must coerce to their columns' native types, and all column
//! names must come from the introspected schema. Only then is a statement
//! built and executed; the backend's answer is classified on failure.

use crate::config::Session;
use crate::db::executor;
use crate::error::{AdminError, AdminResult};
use crate::models::{QueryResult, TableSchema, Value};
use crate::sql::classify::ValueDomain;
use crate::sql::{Statement, builder};
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::mysql::MySqlConnection;
use tracing::info;

/// Coerce a raw text input to the native value of a key column's domain.
pub fn coerce_key_value(domain: &ValueDomain, raw: &str) -> AdminResult<Value> {
    let trimmed = raw.trim();
    match domain {
        ValueDomain::Integer => trimmed
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| AdminError::validation(format!("'{trimmed}' ist keine ganze Zahl"))),
        ValueDomain::Decimal => {
            // Validate numerically, keep the literal text for exactness.
            trimmed
                .parse::<f64>()
                .map(|_| Value::Decimal(trimmed.to_string()))
                .map_err(|_| AdminError::validation(format!("'{trimmed}' ist keine Zahl")))
        }
        ValueDomain::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|_| {
                AdminError::validation(format!("'{trimmed}' ist kein Datum (JJJJ-MM-TT)"))
            }),
        ValueDomain::DateTime => NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
            .map(Value::DateTime)
            .map_err(|_| {
                AdminError::validation(format!(
                    "'{trimmed}' ist kein Zeitpunkt (JJJJ-MM-TT HH:MM:SS)"
                ))
            }),
        ValueDomain::Enumerated(_) | ValueDomain::FreeText => {
            Ok(Value::Text(trimmed.to_string()))
        }
    }
}

/// Identity of one row: the primary-key columns with their values, in key
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct RowKey {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl RowKey {
    /// Build a key from already-typed values. Column and value counts must
    /// match and the key must not be empty.
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> AdminResult<Self> {
        if columns.is_empty() {
            return Err(AdminError::validation("Leerer Primärschlüssel"));
        }
        if columns.len() != values.len() {
            return Err(AdminError::validation(format!(
                "Schlüsselspalten und -werte passen nicht zusammen ({} Spalten, {} Werte)",
                columns.len(),
                values.len()
            )));
        }
        Ok(Self { columns, values })
    }

    /// Build a key for a described table from raw text inputs, one per
    /// primary-key column in key order. Refuses tables without a primary key
    /// before anything else happens.
    pub fn from_raw(schema: &TableSchema, raw_values: &[&str]) -> AdminResult<Self> {
        let pk_cols = require_primary_key(schema)?;
        if raw_values.len() != pk_cols.len() {
            return Err(AdminError::validation(format!(
                "Tabelle '{}' erwartet {} Schlüsselwert(e), {} angegeben",
                schema.table_name,
                pk_cols.len(),
                raw_values.len()
            )));
        }
        let mut values = Vec::with_capacity(pk_cols.len());
        for (col_name, raw) in pk_cols.iter().zip(raw_values) {
            // Column is known to exist: the names come from the schema itself.
            let column = schema
                .column(col_name)
                .ok_or_else(|| AdminError::schema("Schlüsselspalte fehlt", col_name.clone()))?;
            values.push(coerce_key_value(&column.domain(), raw)?);
        }
        Ok(Self {
            columns: pk_cols,
            values,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// The table's primary key, or a validation error when it has none — a table
/// without one has no well-defined row identity, and guessing is worse than
/// refusing.
fn require_primary_key(schema: &TableSchema) -> AdminResult<Vec<String>> {
    let pk = schema.primary_key();
    if pk.is_empty() {
        return Err(AdminError::validation(format!(
            "Tabelle '{}' hat keinen Primärschlüssel; Bearbeiten und Löschen sind nicht möglich",
            schema.table_name
        )));
    }
    Ok(pk)
}

/// A key built elsewhere must still address this table's actual key columns.
fn check_key_matches(schema: &TableSchema, key: &RowKey) -> AdminResult<()> {
    let pk = require_primary_key(schema)?;
    if key.columns() != pk.as_slice() {
        return Err(AdminError::validation(format!(
            "Schlüsselspalten {:?} passen nicht zum Primärschlüssel {:?} der Tabelle '{}'",
            key.columns(),
            pk,
            schema.table_name
        )));
    }
    Ok(())
}

/// Every written column must exist in the introspected schema.
fn check_value_columns(schema: &TableSchema, values: &[(String, Value)]) -> AdminResult<()> {
    for (column, _) in values {
        if !schema.has_column(column) {
            return Err(AdminError::validation(format!(
                "Unbekannte Spalte '{}' in Tabelle '{}'",
                column, schema.table_name
            )));
        }
    }
    Ok(())
}

/// Insert a new row. Returns the affected-row count (1 on success).
pub async fn insert_row(
    conn: &mut MySqlConnection,
    session: &Session,
    schema: &TableSchema,
    values: &[(String, Value)],
) -> AdminResult<u64> {
    session.require_editor("Eintrag hinzufügen")?;
    check_value_columns(schema, values)?;
    let stmt = builder::build_insert(&schema.table_name, values)?;
    let affected = executor::run_write(conn, &stmt).await?;
    info!(
        table = %schema.table_name,
        identity = session.identity().unwrap_or("-"),
        rows_affected = affected,
        "Row inserted"
    );
    Ok(affected)
}

/// Update the row addressed by `key`. Returns the affected-row count.
pub async fn update_row(
    conn: &mut MySqlConnection,
    session: &Session,
    schema: &TableSchema,
    values: &[(String, Value)],
    key: &RowKey,
) -> AdminResult<u64> {
    session.require_editor("Eintrag bearbeiten")?;
    check_key_matches(schema, key)?;
    check_value_columns(schema, values)?;
    let stmt = builder::build_update(&schema.table_name, values, key.columns(), key.values())?;
    let affected = executor::run_write(conn, &stmt).await?;
    info!(
        table = %schema.table_name,
        identity = session.identity().unwrap_or("-"),
        rows_affected = affected,
        "Row updated"
    );
    Ok(affected)
}

/// Delete the row addressed by `key`. Deleting an already-deleted row
/// affects zero rows and is not an error.
pub async fn delete_row(
    conn: &mut MySqlConnection,
    session: &Session,
    schema: &TableSchema,
    key: &RowKey,
) -> AdminResult<u64> {
    session.require_editor("Eintrag löschen")?;
    check_key_matches(schema, key)?;
    let stmt = builder::build_delete(&schema.table_name, key.columns(), key.values())?;
    let affected = executor::run_write(conn, &stmt).await?;
    info!(
        table = %schema.table_name,
        identity = session.identity().unwrap_or("-"),
        rows_affected = affected,
        "Row deleted"
    );
    Ok(affected)
}

/// Fetch the row addressed by `key`, e.g. to show it before a delete.
pub async fn fetch_row(
    conn: &mut MySqlConnection,
    schema: &TableSchema,
    key: &RowKey,
) -> AdminResult<(Statement, QueryResult)> {
    check_key_matches(schema, key)?;
    let stmt = builder::build_select_by_key(&schema.table_name, key.columns(), key.values())?;
    let result = executor::run_select(conn, &stmt).await?;
    Ok((stmt, result))
}
