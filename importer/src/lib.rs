//! # simapro-import - LCI to SimaPro import conversion
//!
//! Converts a raw life-cycle-inventory (LCI) CSV table into the CSV layout
//! SimaPro expects for bulk import. Each source row lists the lifecycle
//! modules it belongs to; the conversion emits one import row per module,
//! optionally restricted to an allow-list.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Raw LCI    │────▶│   Parser    │────▶│  Expander   │────▶│  SimaPro    │
//! │  CSV file   │     │  (auto-enc) │     │  (+filter)  │     │  import CSV │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use simapro_import::{run_import, ImportOptions};
//!
//! let summary = run_import(&ImportOptions::new("raw_lci.csv", "import.csv"))?;
//! println!("Exported {} rows", summary.rows_exported);
//! # Ok::<(), simapro_import::ImportError>(())
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per stage
//! - [`models`] - Records, module filter, in-memory table
//! - [`parser`] - CSV reading with encoding detection
//! - [`transform`] - Expansion and the end-to-end pipeline
//! - [`export`] - Atomic CSV writing
//! - [`logging`] - `tracing` subscriber setup

pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod parser;
pub mod transform;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, EmptyResultError, ImportError, SchemaError, WriteError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{InputRecord, ModuleFilter, OutputRecord, Table, OUTPUT_COLUMNS, REQUIRED_COLUMNS};

// =============================================================================
// Re-exports - CSV
// =============================================================================

pub use export::{to_csv_string, write_table};
pub use parser::{parse_bytes, parse_table, read_table, ParsedTable};

// =============================================================================
// Re-exports - Transform
// =============================================================================

pub use transform::{
    build_output_table, convert_table, expand, parse_module_filter, run_import, validate_schema,
    ImportOptions, ImportSummary, LciTable,
};
