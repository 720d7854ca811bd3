//! File-backed join configuration.
//!
//! Optional display-time enrichment joins per base table, loaded from a JSON
//! file of the shape:
//!
//! ```json
//! {
//!   "Veranstaltung": [
//!     {
//!       "join_table": "Ort",
//!       "join_on": ["ort_id"],
//!       "display_columns": ["ort_name"]
//!     }
//!   ]
//! }
//! ```

use crate::error::{AdminError, AdminResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One configured left-join: the table to join, the equality columns, and
/// the columns of the joined table to show alongside the base table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSpec {
    pub join_table: String,
    pub join_on: Vec<String>,
    pub display_columns: Vec<String>,
}

/// Join entries per base table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JoinConfig {
    tables: HashMap<String, Vec<JoinSpec>>,
}

impl JoinConfig {
    /// Load the configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> AdminResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            AdminError::config(format!(
                "Join-Konfiguration {} nicht lesbar: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&text)
    }

    /// Parse the configuration from JSON text.
    pub fn from_json(text: &str) -> AdminResult<Self> {
        serde_json::from_str(text)
            .map_err(|e| AdminError::config(format!("Join-Konfiguration ungültig: {e}")))
    }

    /// Joins configured for a base table; empty when none are configured.
    pub fn joins_for(&self, table: &str) -> &[JoinSpec] {
        self.tables.get(table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_joins(&self, table: &str) -> bool {
        !self.joins_for(table).is_empty()
    }
}
