//! Schema-aware SQL construction and browsing core for the university
//! sports course database.
//!
//! This library is the logic layer of an administrative data browser and
//! editor: it introspects table schemas live from MySQL, classifies column
//! types into value domains, normalizes per-column filter input into
//! criteria, builds safely parameterized SELECT/INSERT/UPDATE/DELETE
//! statements (composite primary keys included), executes them one statement
//! per interaction, and classifies backend failures into a stable,
//! German-language error taxonomy. Rendering, session plumbing, and database
//! provisioning live outside this crate.

pub mod browse;
pub mod config;
pub mod db;
pub mod editor;
pub mod error;
pub mod export;
pub mod models;
pub mod sql;

pub use config::{ConnectionSettings, Session};
pub use editor::RowKey;
pub use error::{AdminError, AdminResult, ClassifiedError, ErrorCategory};
pub use models::{ColumnSchema, KeyRole, QueryResult, TableSchema, Value};
pub use sql::{
    FilterCriterion, FilterInput, FilterSet, InputSpec, JoinConfig, JoinSpec, Statement,
    TableSnapshot, ValueDomain,
};
