//! Logsweep record flattening and export.
//!
//! This crate provides:
//! - Schema derivation: nested records to a sorted list of dotted key paths
//! - Flattening: one nested record to one row of strings aligned to a schema
//! - Writers: streaming CSV with a header-once policy, and pretty JSON batches
//!
//! The schema is derived from a single representative record (the first of a
//! batch) and assumed stable across the run. Records that deviate produce
//! empty cells or dropped values rather than errors; drift is logged, not
//! fatal.

pub mod flatten;
pub mod schema;
pub mod writer;

pub use flatten::{flatten_record, render_leaf};
pub use schema::Schema;
pub use writer::{write_json_pretty, CsvExporter};

/// One hit returned by the query service: a nested JSON object.
pub type Record = serde_json::Map<String, serde_json::Value>;
