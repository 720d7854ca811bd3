//! SQL construction layer: type classification, filter criteria, and the
//! statement builders.

pub mod builder;
pub mod classify;
pub mod criteria;
pub mod joins;

pub use builder::{
    Statement, build_delete, build_insert, build_select, build_select_by_key,
    build_select_with_joins, build_update, quote_ident,
};
pub use classify::{InputSpec, ValueDomain, classify, input_spec, parse_enum_options};
pub use criteria::{FilterCriterion, FilterInput, FilterSet, TableSnapshot};
pub use joins::{JoinConfig, JoinSpec};
