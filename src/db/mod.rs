//! Database access layer: per-action connections, live introspection, and
//! single-statement execution.

pub mod connect;
pub mod decode;
pub mod executor;
pub mod introspect;

pub use connect::open;
pub use executor::{
    RawOutcome, is_read_statement, run_raw, run_select, run_select_with_timeout, run_write,
    run_write_with_timeout,
};
pub use introspect::{describe, list_tables};
