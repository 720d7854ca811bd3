//! Column and table schema models.
//!
//! These types mirror what the introspector reads from
//! `information_schema.columns`. They are rebuilt on every interaction;
//! nothing here survives a render pass.

use crate::sql::classify::{self, ValueDomain};
use serde::{Deserialize, Serialize};

/// Role a column plays in the table's identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyRole {
    /// Ordinary column
    #[default]
    None,
    /// Part of the primary key
    Primary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    /// Full type as reported by the backend (e.g. `int(11)`, `enum('aktiv','inaktiv')`)
    pub raw_type: String,
    pub nullable: bool,
    pub key_role: KeyRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Extra attributes (e.g. `auto_increment`)
    #[serde(default)]
    pub extra: String,
}

impl ColumnSchema {
    /// Create a new column schema.
    pub fn new(name: impl Into<String>, raw_type: impl Into<String>, nullable: bool) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
            nullable,
            key_role: KeyRole::None,
            default: None,
            extra: String::new(),
        }
    }

    /// Mark this column as part of the primary key.
    pub fn with_key_role(mut self, key_role: KeyRole) -> Self {
        self.key_role = key_role;
        self
    }

    /// Set the default value expression.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Set the extra attributes.
    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = extra.into();
        self
    }

    pub fn is_primary(&self) -> bool {
        self.key_role == KeyRole::Primary
    }

    /// Whether the backend fills this column itself (auto-increment).
    pub fn auto_generated(&self) -> bool {
        self.extra.to_lowercase().contains("auto_increment")
    }

    /// Semantic value domain derived from the raw type.
    pub fn domain(&self) -> ValueDomain {
        classify::classify(&self.raw_type)
    }
}

/// Described schema of one table, fetched live per interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    pub table_name: String,
    pub columns: Vec<ColumnSchema>,
}

impl TableSchema {
    /// Create a new table schema.
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: Vec::new(),
        }
    }

    /// Add a column.
    pub fn with_column(mut self, column: ColumnSchema) -> Self {
        self.columns.push(column);
        self
    }

    /// Ordered names of the PRIMARY-tagged columns. May be empty, in which
    /// case the table has no addressable row identity.
    pub fn primary_key(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.is_primary())
            .map(|c| c.name.clone())
            .collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// All column names in schema order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_schema() -> TableSchema {
        TableSchema::new("Veranstaltung")
            .with_column(
                ColumnSchema::new("angebot_id", "int(11)", false).with_key_role(KeyRole::Primary),
            )
            .with_column(
                ColumnSchema::new("termin", "datetime", false).with_key_role(KeyRole::Primary),
            )
            .with_column(ColumnSchema::new("ort_id", "int(11)", true))
    }

    #[test]
    fn test_primary_key_preserves_column_order() {
        let schema = sample_schema();
        assert_eq!(schema.primary_key(), vec!["angebot_id", "termin"]);
    }

    #[test]
    fn test_column_lookup() {
        let schema = sample_schema();
        assert!(schema.has_column("ort_id"));
        assert!(!schema.has_column("ort_name"));
        assert!(schema.column("termin").unwrap().is_primary());
    }

    #[test]
    fn test_auto_generated_from_extra() {
        let col = ColumnSchema::new("id", "int(11)", false).with_extra("auto_increment");
        assert!(col.auto_generated());
        let plain = ColumnSchema::new("name", "varchar(50)", true);
        assert!(!plain.auto_generated());
    }
}
