//! Schema module
//!
//! Schema model snapshots, structural comparison, corrective statement
//! generation, and live-database introspection.

pub mod diff;
pub mod generator;
pub mod introspect;
pub mod types;

// Re-export key types
pub use diff::{compare, DifferenceReport, TypeDifference};
pub use generator::{collect_missing_default_values, collect_missing_primary_keys, ScriptGenerator};
pub use types::{Column, LogicalType, SchemaModel, Table};
