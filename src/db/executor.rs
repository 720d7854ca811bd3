//! Statement execution.
//!
//! Each call is one round trip: bind the parameters, execute the single
//! statement against the per-action connection, fetch every row eagerly,
//! return. Writes auto-commit individually; there is no multi-statement
//! transaction, so a failed write leaves zero rows changed. Backend failures
//! are classified on the way out and never escape as raw driver errors.

use crate::config::{DEFAULT_QUERY_TIMEOUT_SECS, Session};
use crate::db::decode::decode_cell;
use crate::error::{AdminError, AdminResult};
use crate::models::{QueryResult, Value};
use crate::sql::Statement;
use sqlx::mysql::{MySqlArguments, MySqlConnection};
use sqlx::{Column, Executor, Row, Statement as _};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

/// Outcome of a free-form statement.
#[derive(Debug, Clone)]
pub enum RawOutcome {
    /// Read statement: materialized rows
    Rows(QueryResult),
    /// Write statement: affected-row count
    Affected(u64),
}

/// Bind one parameter to a MySQL query.
fn bind_value<'q>(
    query: sqlx::query::Query<'q, sqlx::MySql, MySqlArguments>,
    value: &'q Value,
) -> sqlx::query::Query<'q, sqlx::MySql, MySqlArguments> {
    match value {
        Value::Null => query.bind(None::<String>),
        Value::Bool(v) => query.bind(*v),
        Value::Int(v) => query.bind(*v),
        Value::Float(v) => query.bind(*v),
        Value::Decimal(v) => query.bind(v.as_str()),
        Value::Text(v) => query.bind(v.as_str()),
        Value::Date(v) => query.bind(*v),
        Value::DateTime(v) => query.bind(*v),
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_QUERY_TIMEOUT_SECS)
}

/// Execute a read statement and materialize the full result.
pub async fn run_select(
    conn: &mut MySqlConnection,
    stmt: &Statement,
) -> AdminResult<QueryResult> {
    run_select_with_timeout(conn, stmt, default_timeout()).await
}

/// Execute a read statement with an explicit timeout.
pub async fn run_select_with_timeout(
    conn: &mut MySqlConnection,
    stmt: &Statement,
    query_timeout: Duration,
) -> AdminResult<QueryResult> {
    debug!(sql = %stmt.sql, params = stmt.params.len(), "Executing query");

    let mut query = sqlx::query(&stmt.sql);
    for param in &stmt.params {
        query = bind_value(query, param);
    }

    let rows = match timeout(query_timeout, query.fetch_all(&mut *conn)).await {
        Ok(Ok(rows)) => rows,
        Ok(Err(e)) => return Err(AdminError::from(e)),
        Err(_) => {
            return Err(AdminError::timeout(
                "Abfrage",
                query_timeout.as_secs(),
            ));
        }
    };

    if let Some(first) = rows.first() {
        let columns: Vec<String> = first
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        let mut result = QueryResult::new(columns);
        for row in &rows {
            let cells = (0..row.columns().len())
                .map(|idx| decode_cell(row, idx))
                .collect();
            result.push_row(cells);
        }
        Ok(result)
    } else {
        // Zero rows: recover the column list from the prepared statement's
        // metadata so an empty result still renders with headers.
        let prepared = conn.prepare(&stmt.sql).await?;
        let columns = prepared
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        Ok(QueryResult::new(columns))
    }
}

/// Execute a write statement and return the affected-row count.
/// The statement auto-commits on its own.
pub async fn run_write(conn: &mut MySqlConnection, stmt: &Statement) -> AdminResult<u64> {
    run_write_with_timeout(conn, stmt, default_timeout()).await
}

/// Execute a write statement with an explicit timeout.
pub async fn run_write_with_timeout(
    conn: &mut MySqlConnection,
    stmt: &Statement,
    query_timeout: Duration,
) -> AdminResult<u64> {
    debug!(sql = %stmt.sql, params = stmt.params.len(), "Executing write");

    let mut query = sqlx::query(&stmt.sql);
    for param in &stmt.params {
        query = bind_value(query, param);
    }

    match timeout(query_timeout, query.execute(&mut *conn)).await {
        Ok(Ok(done)) => {
            info!(
                rows_affected = done.rows_affected(),
                "Write statement completed"
            );
            Ok(done.rows_affected())
        }
        Ok(Err(e)) => Err(AdminError::from(e)),
        Err(_) => Err(AdminError::timeout(
            "Schreiboperation",
            query_timeout.as_secs(),
        )),
    }
}

/// Leading-keyword check deciding whether a free-form statement produces a
/// result set.
pub fn is_read_statement(sql: &str) -> bool {
    let first = sql.trim_start().split_whitespace().next().unwrap_or("");
    matches!(
        first.to_uppercase().as_str(),
        "SELECT" | "SHOW" | "DESCRIBE" | "DESC" | "EXPLAIN"
    )
}

/// Run a free-form statement typed by the operator.
///
/// Read statements fetch a result set; everything else executes as a write
/// and needs an editor session. The statement text itself comes from the
/// privileged free-form surface, not from the structured builders.
pub async fn run_raw(
    conn: &mut MySqlConnection,
    session: &Session,
    sql: &str,
) -> AdminResult<RawOutcome> {
    let trimmed = sql.trim();
    if trimmed.is_empty() {
        return Err(AdminError::validation("Leere SQL-Anweisung"));
    }

    if is_read_statement(trimmed) {
        let stmt = Statement::new(trimmed, Vec::new());
        let result = run_select(conn, &stmt).await?;
        Ok(RawOutcome::Rows(result))
    } else {
        session.require_editor("Freie SQL-Anweisung")?;
        let stmt = Statement::new(trimmed, Vec::new());
        let affected = run_write(conn, &stmt).await?;
        Ok(RawOutcome::Affected(affected))
    }
}
