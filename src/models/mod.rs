//! Data models shared across the crate.

pub mod column;
pub mod result;
pub mod value;

pub use column::{ColumnSchema, KeyRole, TableSchema};
pub use result::QueryResult;
pub use value::Value;
