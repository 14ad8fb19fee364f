//! Domain models for the LCI to SimaPro conversion.
//!
//! - [`InputRecord`] - one row of the raw LCI table
//! - [`OutputRecord`] - one row of the SimaPro import table
//! - [`ModuleFilter`] - optional allow-list of lifecycle modules
//! - [`Table`] - header-addressed in-memory table
//!
//! Everything here is transient: records are built during the single
//! expansion pass and dropped once the output table is written.

use std::collections::HashSet;

mod table;

pub use table::Table;

// =============================================================================
// Column Names
// =============================================================================

/// Source column holding the flow amount.
pub const COL_AMOUNT: &str = "Amount";
/// Source column holding the unit.
pub const COL_UNIT: &str = "Unit";
/// Source column holding the activity (process/flow) name.
pub const COL_ACTIVITY: &str = "Activity";
/// Source column holding the flow category.
pub const COL_CATEGORY: &str = "Category";
/// Source column holding the comma-separated lifecycle modules.
pub const COL_STAGES: &str = "Stages";

/// Required source columns, in the order they are reported when missing.
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_AMOUNT, COL_UNIT, COL_ACTIVITY, COL_CATEGORY, COL_STAGES];

/// Output columns of the SimaPro import table, in file order.
pub const OUTPUT_COLUMNS: [&str; 5] = ["Flow amount", "Unit", "Simapro name", "Simapro type", "Module"];

// =============================================================================
// Input Record
// =============================================================================

/// One row of the raw LCI table.
///
/// `amount` and `unit` are opaque payload: they are carried through as the
/// exact text found in the source cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRecord<'a> {
    pub amount: &'a str,
    pub unit: &'a str,
    pub activity: &'a str,
    pub category: &'a str,
    pub stages: &'a str,
}

impl<'a> InputRecord<'a> {
    /// Lifecycle module tokens in the order written, trimmed, blanks dropped.
    pub fn modules(&self) -> impl Iterator<Item = &'a str> {
        split_tokens(self.stages)
    }

    /// Build the output row for one of this record's modules.
    pub fn to_output(&self, module: &str) -> OutputRecord {
        OutputRecord {
            flow_amount: self.amount.to_string(),
            unit: self.unit.to_string(),
            simapro_name: self.activity.to_string(),
            simapro_type: self.category.to_string(),
            module: module.to_string(),
        }
    }
}

// =============================================================================
// Output Record
// =============================================================================

/// One row of the SimaPro import table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRecord {
    pub flow_amount: String,
    pub unit: String,
    pub simapro_name: String,
    pub simapro_type: String,
    pub module: String,
}

impl OutputRecord {
    /// Cells in [`OUTPUT_COLUMNS`] order.
    pub fn into_row(self) -> Vec<String> {
        vec![
            self.flow_amount,
            self.unit,
            self.simapro_name,
            self.simapro_type,
            self.module,
        ]
    }
}

// =============================================================================
// Module Filter
// =============================================================================

/// Allow-list of lifecycle modules.
///
/// Membership is exact and case-sensitive: `a1` does not match `A1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFilter {
    modules: HashSet<String>,
}

// Never empty: `from_tokens` returns `None` instead
#[allow(clippy::len_without_is_empty)]
impl ModuleFilter {
    /// Build a filter from tokens. Returns `None` when no non-blank token remains.
    pub fn from_tokens<I, S>(tokens: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let modules: HashSet<String> = tokens
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if modules.is_empty() {
            None
        } else {
            Some(Self { modules })
        }
    }

    /// Whether `module` passes the filter.
    pub fn allows(&self, module: &str) -> bool {
        self.modules.contains(module)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Filter members, sorted for stable display.
    pub fn sorted(&self) -> Vec<&str> {
        let mut modules: Vec<&str> = self.modules.iter().map(String::as_str).collect();
        modules.sort_unstable();
        modules
    }
}

/// Split a comma-separated list, trimming each token and dropping blanks.
pub(crate) fn split_tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steel() -> InputRecord<'static> {
        InputRecord {
            amount: "1.5",
            unit: "kg",
            activity: "Steel",
            category: "Material",
            stages: " A1, A2 ,A3 ",
        }
    }

    #[test]
    fn test_modules_trimmed_in_order() {
        let modules: Vec<&str> = steel().modules().collect();
        assert_eq!(modules, vec!["A1", "A2", "A3"]);
    }

    #[test]
    fn test_blank_stages_yield_nothing() {
        let record = InputRecord { stages: " , ,", ..steel() };
        assert_eq!(record.modules().count(), 0);

        let record = InputRecord { stages: "", ..steel() };
        assert_eq!(record.modules().count(), 0);
    }

    #[test]
    fn test_to_output_copies_fields() {
        let out = steel().to_output("A2");
        assert_eq!(out.flow_amount, "1.5");
        assert_eq!(out.unit, "kg");
        assert_eq!(out.simapro_name, "Steel");
        assert_eq!(out.simapro_type, "Material");
        assert_eq!(out.module, "A2");
        assert_eq!(out.into_row(), vec!["1.5", "kg", "Steel", "Material", "A2"]);
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let filter = ModuleFilter::from_tokens(["A1", " B2 "]).unwrap();
        assert!(filter.allows("A1"));
        assert!(filter.allows("B2"));
        assert!(!filter.allows("a1"));
        assert!(!filter.allows(" A1"));
        assert_eq!(filter.sorted(), vec!["A1", "B2"]);
    }

    #[test]
    fn test_filter_from_blank_tokens_is_none() {
        assert!(ModuleFilter::from_tokens(["", "  "]).is_none());
        assert!(ModuleFilter::from_tokens(Vec::<String>::new()).is_none());
    }

    #[test]
    fn test_filter_never_empty() {
        let filter = ModuleFilter::from_tokens(["", "A1", " A1 "]).unwrap();
        assert_eq!(filter.len(), 1);
    }
}
