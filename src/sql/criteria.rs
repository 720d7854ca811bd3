//! Filter criteria for the read path.
//!
//! A criterion constrains one column: either a closed interval (numeric and
//! temporal domains) or a set of permitted values (enumerated and free-text
//! domains). A column without a criterion is unconstrained. An *active*
//! filter with an empty value set is a legitimate way to exclude every row
//! and must stay distinguishable from an absent filter.

use crate::error::{AdminError, AdminResult};
use crate::models::{QueryResult, TableSchema, Value};
use crate::sql::classify::{self, InputSpec, ValueDomain};
use serde::{Deserialize, Serialize};

/// Constraint on a single column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterCriterion {
    /// Closed interval, both bounds inclusive. An inverted range (low above
    /// high) passes through unchanged and simply matches nothing.
    Range { low: Value, high: Value },
    /// Finite set of permitted values. Empty means "match no row".
    OneOf(Vec<Value>),
}

/// Raw per-column input collected by the UI for an *active* filter.
/// Inactive columns are simply not submitted.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterInput {
    Range { low: Value, high: Value },
    Selection(Vec<Value>),
}

/// Insertion-ordered criteria map. Order matters: generated placeholders and
/// their parameters follow it left to right.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    entries: Vec<(String, FilterCriterion)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the criterion for a column.
    pub fn insert(&mut self, column: impl Into<String>, criterion: FilterCriterion) {
        let column = column.into();
        if let Some(entry) = self.entries.iter_mut().find(|(c, _)| *c == column) {
            entry.1 = criterion;
        } else {
            self.entries.push((column, criterion));
        }
    }

    pub fn get(&self, column: &str) -> Option<&FilterCriterion> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, FilterCriterion)> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Build a criteria set from the active per-column inputs of one render
    /// pass. Columns are taken in schema order so the generated SQL is
    /// stable across reruns. Unknown column names are refused: identifiers
    /// must come from the introspected schema.
    pub fn from_inputs<I>(schema: &TableSchema, inputs: I) -> AdminResult<Self>
    where
        I: IntoIterator<Item = (String, FilterInput)>,
    {
        let mut pending: Vec<(String, FilterInput)> = Vec::new();
        for (column, input) in inputs {
            if !schema.has_column(&column) {
                return Err(AdminError::validation(format!(
                    "Unbekannte Spalte im Filter: {column}"
                )));
            }
            pending.push((column, input));
        }

        let mut set = Self::new();
        for col in &schema.columns {
            if let Some((_, input)) = pending.iter().find(|(c, _)| *c == col.name) {
                let criterion = match input {
                    FilterInput::Range { low, high } => FilterCriterion::Range {
                        low: low.clone(),
                        high: high.clone(),
                    },
                    FilterInput::Selection(values) => FilterCriterion::OneOf(values.clone()),
                };
                set.insert(col.name.clone(), criterion);
            }
        }
        Ok(set)
    }
}

/// A described table together with its currently loaded rows; the basis the
/// filter sidebar is built from.
#[derive(Debug, Clone)]
pub struct TableSnapshot {
    pub schema: TableSchema,
    pub data: QueryResult,
}

impl TableSnapshot {
    pub fn new(schema: TableSchema, data: QueryResult) -> Self {
        Self { schema, data }
    }

    /// Number of distinct non-null values observed for a column.
    pub fn distinct_count(&self, column: &str) -> usize {
        self.distinct_values(column).len()
    }

    /// Distinct non-null values observed for a column, in first-seen order.
    pub fn distinct_values(&self, column: &str) -> Vec<String> {
        let mut seen = Vec::new();
        if let Some(values) = self.data.column_values(column) {
            for value in values {
                if value.is_null() {
                    continue;
                }
                let text = value.to_string();
                if !seen.contains(&text) {
                    seen.push(text);
                }
            }
        }
        seen
    }

    /// Which filter widget to offer for a column, if any.
    ///
    /// Numeric columns with fewer than two distinct observed values get no
    /// range filter (there is nothing to bound). Free-text columns offer a
    /// multi-select over the observed values, enumerated columns over their
    /// declared options.
    pub fn offered_filter(&self, column: &str) -> Option<InputSpec> {
        let col = self.schema.column(column)?;
        match col.domain() {
            ValueDomain::Integer | ValueDomain::Decimal
                if self.distinct_count(column) < 2 =>
            {
                None
            }
            ValueDomain::FreeText => Some(InputSpec::MultiSelect {
                options: self.distinct_values(column),
            }),
            domain => Some(classify::input_spec(&domain)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColumnSchema, KeyRole};

    fn sportangebot_schema() -> TableSchema {
        TableSchema::new("Sportangebot")
            .with_column(
                ColumnSchema::new("angebot_id", "int(11)", false).with_key_role(KeyRole::Primary),
            )
            .with_column(ColumnSchema::new("angebot_name", "varchar(100)", false))
            .with_column(ColumnSchema::new("status", "enum('aktiv','inaktiv')", false))
    }

    #[test]
    fn test_inactive_column_absent_from_set() {
        let schema = sportangebot_schema();
        let set = FilterSet::from_inputs(
            &schema,
            vec![(
                "status".to_string(),
                FilterInput::Selection(vec![Value::Text("aktiv".into())]),
            )],
        )
        .unwrap();
        assert!(set.get("angebot_id").is_none());
        assert!(set.get("status").is_some());
    }

    #[test]
    fn test_active_empty_selection_is_kept() {
        let schema = sportangebot_schema();
        let set = FilterSet::from_inputs(
            &schema,
            vec![("status".to_string(), FilterInput::Selection(vec![]))],
        )
        .unwrap();
        assert_eq!(set.get("status"), Some(&FilterCriterion::OneOf(vec![])));
    }

    #[test]
    fn test_inverted_range_passes_through() {
        let schema = sportangebot_schema();
        let set = FilterSet::from_inputs(
            &schema,
            vec![(
                "angebot_id".to_string(),
                FilterInput::Range {
                    low: Value::Int(10),
                    high: Value::Int(1),
                },
            )],
        )
        .unwrap();
        assert_eq!(
            set.get("angebot_id"),
            Some(&FilterCriterion::Range {
                low: Value::Int(10),
                high: Value::Int(1),
            })
        );
    }

    #[test]
    fn test_unknown_column_is_refused() {
        let schema = sportangebot_schema();
        let result = FilterSet::from_inputs(
            &schema,
            vec![("no_such_col".to_string(), FilterInput::Selection(vec![]))],
        );
        assert!(matches!(result, Err(AdminError::Validation { .. })));
    }

    #[test]
    fn test_criteria_follow_schema_order() {
        let schema = sportangebot_schema();
        let set = FilterSet::from_inputs(
            &schema,
            vec![
                ("status".to_string(), FilterInput::Selection(vec![])),
                (
                    "angebot_id".to_string(),
                    FilterInput::Range {
                        low: Value::Int(1),
                        high: Value::Int(5),
                    },
                ),
            ],
        )
        .unwrap();
        let order: Vec<&str> = set.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(order, vec!["angebot_id", "status"]);
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut set = FilterSet::new();
        set.insert("status", FilterCriterion::OneOf(vec![]));
        set.insert(
            "status",
            FilterCriterion::OneOf(vec![Value::Text("aktiv".into())]),
        );
        assert_eq!(set.len(), 1);
        assert_eq!(
            set.get("status"),
            Some(&FilterCriterion::OneOf(vec![Value::Text("aktiv".into())]))
        );
    }

    fn snapshot_with_rows(rows: Vec<Vec<Value>>) -> TableSnapshot {
        let mut data = QueryResult::new(vec![
            "angebot_id".into(),
            "angebot_name".into(),
            "status".into(),
        ]);
        for row in rows {
            data.push_row(row);
        }
        TableSnapshot::new(sportangebot_schema(), data)
    }

    #[test]
    fn test_numeric_column_with_single_value_offers_no_range() {
        let snapshot = snapshot_with_rows(vec![
            vec![Value::Int(1), Value::Text("Judo".into()), Value::Text("aktiv".into())],
            vec![Value::Int(1), Value::Text("Rudern".into()), Value::Text("aktiv".into())],
        ]);
        assert_eq!(snapshot.offered_filter("angebot_id"), None);
    }

    #[test]
    fn test_numeric_column_with_spread_offers_range() {
        let snapshot = snapshot_with_rows(vec![
            vec![Value::Int(1), Value::Text("Judo".into()), Value::Text("aktiv".into())],
            vec![Value::Int(2), Value::Text("Rudern".into()), Value::Text("inaktiv".into())],
        ]);
        assert_eq!(
            snapshot.offered_filter("angebot_id"),
            Some(InputSpec::IntegerField)
        );
    }

    #[test]
    fn test_enum_column_offers_declared_options() {
        let snapshot = snapshot_with_rows(vec![]);
        assert_eq!(
            snapshot.offered_filter("status"),
            Some(InputSpec::MultiSelect {
                options: vec!["aktiv".into(), "inaktiv".into()]
            })
        );
    }

    #[test]
    fn test_free_text_column_offers_observed_values() {
        let snapshot = snapshot_with_rows(vec![
            vec![Value::Int(1), Value::Text("Judo".into()), Value::Text("aktiv".into())],
            vec![Value::Int(2), Value::Text("Judo".into()), Value::Text("aktiv".into())],
            vec![Value::Int(3), Value::Text("Rudern".into()), Value::Text("aktiv".into())],
        ]);
        assert_eq!(
            snapshot.offered_filter("angebot_name"),
            Some(InputSpec::MultiSelect {
                options: vec!["Judo".into(), "Rudern".into()]
            })
        );
    }
}
