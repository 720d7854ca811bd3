//! Materialized query results.

use crate::models::Value;
use serde::{Deserialize, Serialize};

/// Tabular result of one statement: ordered column names plus row tuples.
///
/// A zero-row result keeps its column list whenever the backend provided
/// statement metadata; a statement without a result set (a write) has both
/// lists empty and the caller reports the affected-row count separately.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryResult {
    /// Create a result with the given columns and no rows yet.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Empty result for statements that produce no result set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append a row. The caller is responsible for matching the column count.
    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate the values of one column across all rows.
    pub fn column_values(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().filter_map(move |row| row.get(idx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_keeps_columns() {
        let result = QueryResult::new(vec!["a".into(), "b".into()]);
        assert!(result.is_empty());
        assert_eq!(result.columns.len(), 2);
    }

    #[test]
    fn test_column_values() {
        let mut result = QueryResult::new(vec!["id".into(), "name".into()]);
        result.push_row(vec![Value::Int(1), Value::Text("Judo".into())]);
        result.push_row(vec![Value::Int(2), Value::Text("Rudern".into())]);

        let ids: Vec<&Value> = result.column_values("id").unwrap().collect();
        assert_eq!(ids, vec![&Value::Int(1), &Value::Int(2)]);
        assert!(result.column_values("missing").is_none());
    }
}
