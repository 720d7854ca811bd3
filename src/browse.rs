//! Read-path operations: table loading, join enrichment, filtered reads.
//!
//! Every function returns the generated [`Statement`] next to the result so
//! the UI can display the SQL it just ran.

use crate::db::{executor, introspect};
use crate::error::{AdminError, AdminResult};
use crate::models::{QueryResult, TableSchema};
use crate::sql::{FilterSet, JoinConfig, Statement, TableSnapshot, builder};
use sqlx::mysql::MySqlConnection;
use tracing::debug;

/// Load a table for display, applying its configured enrichment joins.
pub async fn load_table(
    conn: &mut MySqlConnection,
    table: &str,
    join_config: Option<&JoinConfig>,
    limit: Option<u32>,
) -> AdminResult<(Statement, QueryResult)> {
    let joins = join_config.map(|c| c.joins_for(table)).unwrap_or(&[]);
    let stmt = builder::build_select_with_joins(table, joins, &FilterSet::new(), limit);
    let result = executor::run_select(conn, &stmt).await?;
    debug!(table, rows = result.row_count(), "Loaded table");
    Ok((stmt, result))
}

/// Describe a table and load its current rows; the basis for building the
/// filter sidebar.
pub async fn load_snapshot(
    conn: &mut MySqlConnection,
    table: &str,
    limit: Option<u32>,
) -> AdminResult<TableSnapshot> {
    let schema = introspect::describe(conn, table).await?;
    let stmt = builder::build_select(table, &FilterSet::new(), limit);
    let data = executor::run_select(conn, &stmt).await?;
    Ok(TableSnapshot::new(schema, data))
}

/// Check that every criterion column exists in the introspected schema:
/// identifiers only ever come from names the introspector has already seen.
fn check_criteria_columns(schema: &TableSchema, criteria: &FilterSet) -> AdminResult<()> {
    for (column, _) in criteria.iter() {
        if !schema.has_column(column) {
            return Err(AdminError::validation(format!(
                "Unbekannte Spalte im Filter: {column}"
            )));
        }
    }
    Ok(())
}

/// Run a criteria-filtered read against a described table. Criterion columns
/// are validated before any SQL is built.
pub async fn filter_table(
    conn: &mut MySqlConnection,
    schema: &TableSchema,
    criteria: &FilterSet,
    limit: Option<u32>,
) -> AdminResult<(Statement, QueryResult)> {
    check_criteria_columns(schema, criteria)?;
    let stmt = builder::build_select(&schema.table_name, criteria, limit);
    let result = executor::run_select(conn, &stmt).await?;
    debug!(
        table = %schema.table_name,
        criteria = criteria.len(),
        rows = result.row_count(),
        "Filtered table"
    );
    Ok((stmt, result))
}
