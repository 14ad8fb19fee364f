//! Transformation module.
//!
//! - Expander: schema check, per-module expansion and filtering
//! - Pipeline: read, convert and write in one run

pub mod expander;
pub mod pipeline;

pub use expander::{build_output_table, expand, parse_module_filter, validate_schema, LciTable};
pub use pipeline::{convert_table, run_import, ImportOptions, ImportSummary};
