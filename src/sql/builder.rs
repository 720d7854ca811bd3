//! Parameterized statement construction.
//!
//! All identifiers (table and column names) are backtick-quoted and must
//! originate from the introspected schema or the join configuration — never
//! from free-form user input. All values travel as positional `?` parameters
//! in placeholder order; nothing user-supplied is interpolated into the SQL
//! text.

use crate::error::{AdminError, AdminResult};
use crate::models::Value;
use crate::sql::criteria::{FilterCriterion, FilterSet};
use crate::sql::joins::JoinSpec;
use serde::{Deserialize, Serialize};

/// A generated statement: SQL text with `?` placeholders plus the parameter
/// values in placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sql)
    }
}

/// Backtick-quote an identifier, doubling embedded backticks.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Render one criterion into a WHERE fragment, appending its parameters.
///
/// The empty active value-set compiles to a constant-false clause: the
/// exclusion stays visible in the generated SQL instead of being dropped.
fn criterion_clause(
    column: &str,
    criterion: &FilterCriterion,
    qualifier: Option<&str>,
    params: &mut Vec<Value>,
) -> String {
    let ident = match qualifier {
        Some(q) => format!("{}.{}", q, quote_ident(column)),
        None => quote_ident(column),
    };
    match criterion {
        FilterCriterion::Range { low, high } => {
            params.push(low.clone());
            params.push(high.clone());
            format!("{ident} BETWEEN ? AND ?")
        }
        FilterCriterion::OneOf(values) if values.is_empty() => "1 = 0".to_string(),
        FilterCriterion::OneOf(values) => {
            let placeholders = vec!["?"; values.len()].join(", ");
            params.extend(values.iter().cloned());
            format!("{ident} IN ({placeholders})")
        }
    }
}

/// Flat AND-conjunction of per-column criteria. No OR, no grouping.
fn where_clause(criteria: &FilterSet, qualifier: Option<&str>, params: &mut Vec<Value>) -> String {
    criteria
        .iter()
        .map(|(column, criterion)| criterion_clause(column, criterion, qualifier, params))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// Append the row cap. Limit application is tracked structurally by this
/// single call site; the generated text is never re-inspected.
fn apply_limit(sql: &mut String, limit: Option<u32>) {
    if let Some(n) = limit {
        if n > 0 {
            sql.push_str(&format!(" LIMIT {n}"));
        }
    }
}

/// Build a filtered `SELECT * FROM <table>`.
pub fn build_select(table: &str, criteria: &FilterSet, limit: Option<u32>) -> Statement {
    let mut params = Vec::new();
    let mut sql = format!("SELECT * FROM {}", quote_ident(table));
    if !criteria.is_empty() {
        let clause = where_clause(criteria, None, &mut params);
        sql.push_str(" WHERE ");
        sql.push_str(&clause);
    }
    apply_limit(&mut sql, limit);
    Statement::new(sql, params)
}

/// Build a display-enriched read: the base table aliased `t`, one LEFT JOIN
/// per configured entry, each join's display columns selected after `t.*`.
/// Criteria columns refer to the base table and are qualified accordingly.
pub fn build_select_with_joins(
    table: &str,
    joins: &[JoinSpec],
    criteria: &FilterSet,
    limit: Option<u32>,
) -> Statement {
    if joins.is_empty() {
        return build_select(table, criteria, limit);
    }

    let mut select_parts = vec!["t.*".to_string()];
    let mut join_clauses = Vec::new();
    for join in joins {
        let jt = quote_ident(&join.join_table);
        for col in &join.display_columns {
            select_parts.push(format!("{jt}.{}", quote_ident(col)));
        }
        let condition = join
            .join_on
            .iter()
            .map(|col| {
                let c = quote_ident(col);
                format!("t.{c} = {jt}.{c}")
            })
            .collect::<Vec<_>>()
            .join(" AND ");
        join_clauses.push(format!("LEFT JOIN {jt} ON {condition}"));
    }

    let mut params = Vec::new();
    let mut sql = format!(
        "SELECT {} FROM {} t {}",
        select_parts.join(", "),
        quote_ident(table),
        join_clauses.join(" ")
    );
    if !criteria.is_empty() {
        let clause = where_clause(criteria, Some("t"), &mut params);
        sql.push_str(" WHERE ");
        sql.push_str(&clause);
    }
    apply_limit(&mut sql, limit);
    Statement::new(sql, params)
}

/// Build an INSERT for the given column/value pairs, in the given order.
pub fn build_insert(table: &str, values: &[(String, Value)]) -> AdminResult<Statement> {
    if values.is_empty() {
        return Err(AdminError::validation("Kein Wert zum Einfügen angegeben"));
    }
    let columns = values
        .iter()
        .map(|(c, _)| quote_ident(c))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; values.len()].join(", ");
    let params = values.iter().map(|(_, v)| v.clone()).collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table),
        columns,
        placeholders
    );
    Ok(Statement::new(sql, params))
}

/// AND-conjoined equality clause over the key columns. `pk_cols` and
/// `pk_vals` are parallel slices; length mismatches and empty keys are
/// refused before any SQL exists.
fn key_clause(pk_cols: &[String], pk_vals: &[Value], params: &mut Vec<Value>) -> AdminResult<String> {
    if pk_cols.is_empty() {
        return Err(AdminError::validation(
            "Kein Primärschlüssel für die Zeilenauswahl angegeben",
        ));
    }
    if pk_cols.len() != pk_vals.len() {
        return Err(AdminError::validation(format!(
            "Schlüsselspalten und -werte passen nicht zusammen ({} Spalten, {} Werte)",
            pk_cols.len(),
            pk_vals.len()
        )));
    }
    params.extend(pk_vals.iter().cloned());
    Ok(pk_cols
        .iter()
        .map(|c| format!("{} = ?", quote_ident(c)))
        .collect::<Vec<_>>()
        .join(" AND "))
}

/// Build an UPDATE addressing one row by its (possibly composite) key.
/// Key parameters follow the assignment parameters, in `pk_cols` order.
pub fn build_update(
    table: &str,
    values: &[(String, Value)],
    pk_cols: &[String],
    pk_vals: &[Value],
) -> AdminResult<Statement> {
    if values.is_empty() {
        return Err(AdminError::validation(
            "Kein Wert zum Aktualisieren angegeben",
        ));
    }
    let assignments = values
        .iter()
        .map(|(c, _)| format!("{} = ?", quote_ident(c)))
        .collect::<Vec<_>>()
        .join(", ");
    let mut params: Vec<Value> = values.iter().map(|(_, v)| v.clone()).collect();
    let clause = key_clause(pk_cols, pk_vals, &mut params)?;
    let sql = format!(
        "UPDATE {} SET {} WHERE {}",
        quote_ident(table),
        assignments,
        clause
    );
    Ok(Statement::new(sql, params))
}

/// Build a DELETE addressing one row by its (possibly composite) key.
pub fn build_delete(table: &str, pk_cols: &[String], pk_vals: &[Value]) -> AdminResult<Statement> {
    let mut params = Vec::new();
    let clause = key_clause(pk_cols, pk_vals, &mut params)?;
    let sql = format!("DELETE FROM {} WHERE {}", quote_ident(table), clause);
    Ok(Statement::new(sql, params))
}

/// Build a SELECT addressing one row by its (possibly composite) key.
pub fn build_select_by_key(
    table: &str,
    pk_cols: &[String],
    pk_vals: &[Value],
) -> AdminResult<Statement> {
    let mut params = Vec::new();
    let clause = key_clause(pk_cols, pk_vals, &mut params)?;
    let sql = format!("SELECT * FROM {} WHERE {}", quote_ident(table), clause);
    Ok(Statement::new(sql, params))
}
