//! High-level pipeline API for LCI to SimaPro conversion.
//!
//! Combines every step of a run: reading, schema validation, expansion and
//! filtering, and writing the import file.
//!
//! # Example
//!
//! ```rust,no_run
//! use simapro_import::{run_import, ImportOptions};
//!
//! let options = ImportOptions::new("raw_lci.csv", "import.csv").with_modules("A1,A2,A3");
//! let summary = run_import(&options)?;
//! println!("Exported {} rows", summary.rows_exported);
//! # Ok::<(), simapro_import::ImportError>(())
//! ```

use std::path::PathBuf;

use tracing::{debug, info};

use super::expander::{build_output_table, expand, parse_module_filter, validate_schema};
use crate::error::ImportResult;
use crate::export::write_table;
use crate::models::{ModuleFilter, Table, OUTPUT_COLUMNS};
use crate::parser::read_table;

/// Configuration for one conversion run.
///
/// Built once at startup and passed down explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Raw LCI CSV to read
    pub source: PathBuf,

    /// SimaPro import CSV to write
    pub destination: PathBuf,

    /// Comma-separated module allow-list, as given on the command line
    pub modules: Option<String>,

    /// Run everything except writing the destination
    pub dry_run: bool,
}

impl ImportOptions {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            modules: None,
            dry_run: false,
        }
    }

    pub fn with_modules(mut self, modules: impl Into<String>) -> Self {
        self.modules = Some(modules.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Data rows in the source table
    pub rows_read: usize,

    /// Rows in the import table
    pub rows_exported: usize,

    /// Distinct modules exported, in first-seen order
    pub modules: Vec<String>,

    /// Detected source encoding
    pub encoding: String,

    /// Where the import table went (`None` on a dry run)
    pub destination: Option<PathBuf>,
}

/// Convert an in-memory source table into the SimaPro import table.
pub fn convert_table(source: &Table, filter: Option<&ModuleFilter>) -> ImportResult<Table> {
    let lci = validate_schema(source)?;
    debug!(rows = lci.len(), "schema ok");

    let records = expand(&lci, filter);
    debug!(records = records.len(), "expanded");

    Ok(build_output_table(records)?)
}

/// Run a full conversion.
///
/// 1. Reads the source CSV
/// 2. Checks the required columns
/// 3. Expands rows per module, applying the filter
/// 4. Fails if nothing is left, before touching the destination
/// 5. Writes the destination CSV
pub fn run_import(options: &ImportOptions) -> ImportResult<ImportSummary> {
    info!(source = %options.source.display(), "reading source table");
    let parsed = read_table(&options.source)?;
    info!(
        encoding = %parsed.encoding,
        rows = parsed.table.len(),
        columns = parsed.table.headers().len(),
        "source table loaded"
    );

    let filter = parse_module_filter(options.modules.as_deref());
    match &filter {
        Some(f) => info!(modules = %f.sorted().join(","), "module filter active"),
        None => info!("no module filter, keeping every module"),
    }

    let output = convert_table(&parsed.table, filter.as_ref())?;
    let modules = distinct_modules(&output);
    info!(rows = output.len(), modules = %modules.join(","), "import table built");

    let destination = if options.dry_run {
        info!("dry run, destination not written");
        None
    } else {
        write_table(&output, &options.destination)?;
        info!(destination = %options.destination.display(), "import table written");
        Some(options.destination.clone())
    };

    Ok(ImportSummary {
        rows_read: parsed.table.len(),
        rows_exported: output.len(),
        modules,
        encoding: parsed.encoding,
        destination,
    })
}

/// Module column values of an import table, deduplicated, first-seen order.
fn distinct_modules(output: &Table) -> Vec<String> {
    let Some(col) = output.column_index(OUTPUT_COLUMNS[4]) else {
        return Vec::new();
    };

    let mut seen = Vec::new();
    for row in output.rows() {
        let module = Table::cell(row, col);
        if !seen.iter().any(|m: &String| m == module) {
            seen.push(module.to_string());
        }
    }
    seen
}
