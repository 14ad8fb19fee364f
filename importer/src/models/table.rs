//! In-memory table: ordered header plus ordered rows of text cells.

/// A header-addressed table of text cells.
///
/// Rows may be shorter than the header (the CSV reader is flexible); a cell
/// past the end of its row reads as the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the first column named exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell text at `col` in `row`, empty when the row is short.
    pub fn cell(row: &[String], col: usize) -> &str {
        row.get(col).map(String::as_str).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_column_lookup_is_exact() {
        let table = Table::new(headers(&["Amount", "unit", "Stages"]));
        assert_eq!(table.column_index("Amount"), Some(0));
        assert_eq!(table.column_index("Stages"), Some(2));
        assert!(!table.has_column("Unit"));
        assert!(!table.has_column("amount"));
    }

    #[test]
    fn test_duplicate_header_first_wins() {
        let table = Table::new(headers(&["Stages", "Other", "Stages"]));
        assert_eq!(table.column_index("Stages"), Some(0));
    }

    #[test]
    fn test_short_row_reads_empty() {
        let mut table = Table::new(headers(&["a", "b", "c"]));
        table.push_row(vec!["1".to_string()]);
        let row = &table.rows()[0];
        assert_eq!(Table::cell(row, 0), "1");
        assert_eq!(Table::cell(row, 2), "");
        assert_eq!(table.len(), 1);
        assert!(!table.is_empty());
    }
}
