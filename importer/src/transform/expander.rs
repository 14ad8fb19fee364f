//! Record expansion: raw LCI rows to SimaPro import rows.
//!
//! Each source row carries a comma-separated list of lifecycle modules in
//! its `Stages` column. Expansion emits one output row per module token,
//! copying the other fields unchanged:
//!
//! ```text
//! Source row                                    Output rows
//! ┌──────────────────────────────────────┐      ┌──────────────────────────────────┐
//! │ 1.5, kg, Steel, Material, "A1, A2"   │  →   │ 1.5, kg, Steel, Material, A1     │
//! └──────────────────────────────────────┘      │ 1.5, kg, Steel, Material, A2     │
//!                                               └──────────────────────────────────┘
//! ```
//!
//! With a [`ModuleFilter`], tokens outside the allow-list are dropped
//! without notice. Output order follows input row order, then token order.

use tracing::debug;

use crate::error::{EmptyResultError, SchemaError};
use crate::models::{
    split_tokens, InputRecord, ModuleFilter, OutputRecord, Table, OUTPUT_COLUMNS, REQUIRED_COLUMNS,
};

/// Positions of the required columns in a source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    amount: usize,
    unit: usize,
    activity: usize,
    category: usize,
    stages: usize,
}

/// A source table known to carry every required column.
///
/// Only obtainable through [`validate_schema`].
#[derive(Debug, Clone, Copy)]
pub struct LciTable<'a> {
    table: &'a Table,
    columns: ColumnIndex,
}

impl<'a> LciTable<'a> {
    /// Number of source rows.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Source rows as typed records, in file order.
    pub fn records(&self) -> impl Iterator<Item = InputRecord<'a>> + 'a {
        let c = self.columns;
        self.table.rows().iter().map(move |row| InputRecord {
            amount: Table::cell(row, c.amount),
            unit: Table::cell(row, c.unit),
            activity: Table::cell(row, c.activity),
            category: Table::cell(row, c.category),
            stages: Table::cell(row, c.stages),
        })
    }
}

/// Check that `table` has every required column.
///
/// All missing names are reported together, in canonical order.
pub fn validate_schema(table: &Table) -> Result<LciTable<'_>, SchemaError> {
    let found = REQUIRED_COLUMNS.map(|col| table.column_index(col));

    match found {
        [Some(amount), Some(unit), Some(activity), Some(category), Some(stages)] => Ok(LciTable {
            table,
            columns: ColumnIndex {
                amount,
                unit,
                activity,
                category,
                stages,
            },
        }),
        _ => Err(SchemaError::MissingColumns(
            REQUIRED_COLUMNS
                .iter()
                .zip(found)
                .filter(|(_, idx)| idx.is_none())
                .map(|(col, _)| col.to_string())
                .collect(),
        )),
    }
}

/// Parse a raw `--modules` value.
///
/// `None`, an empty string, or only blank tokens all mean "no filter".
///
/// # Example
/// ```
/// use simapro_import::transform::parse_module_filter;
///
/// let filter = parse_module_filter(Some("A1, ,A2")).unwrap();
/// assert!(filter.allows("A1") && filter.allows("A2"));
/// assert_eq!(filter.len(), 2);
/// assert!(parse_module_filter(Some(" , ")).is_none());
/// ```
pub fn parse_module_filter(raw: Option<&str>) -> Option<ModuleFilter> {
    raw.and_then(|raw| ModuleFilter::from_tokens(split_tokens(raw)))
}

/// Expand every source row into one output row per surviving module.
pub fn expand(table: &LciTable<'_>, filter: Option<&ModuleFilter>) -> Vec<OutputRecord> {
    let mut output = Vec::new();

    for (row, record) in table.records().enumerate() {
        if record.modules().next().is_none() {
            debug!(row = row + 1, activity = record.activity, "row lists no modules, skipped");
            continue;
        }

        for module in record.modules() {
            if filter.is_some_and(|f| !f.allows(module)) {
                continue;
            }
            output.push(record.to_output(module));
        }
    }

    output
}

/// Assemble the SimaPro import table.
///
/// Fails when there is nothing to export.
pub fn build_output_table(records: Vec<OutputRecord>) -> Result<Table, EmptyResultError> {
    if records.is_empty() {
        return Err(EmptyResultError);
    }

    let headers = OUTPUT_COLUMNS.iter().map(|c| c.to_string()).collect();
    let rows = records.into_iter().map(OutputRecord::into_row).collect();

    Ok(Table::with_rows(headers, rows))
}
