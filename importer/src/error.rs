//! Error types for the SimaPro import conversion.
//!
//! One enum per stage of the run:
//!
//! - [`CsvError`] - the source file cannot be read, decoded or parsed
//! - [`SchemaError`] - the source table lacks required columns
//! - [`EmptyResultError`] - expansion and filtering produced no rows
//! - [`WriteError`] - the destination file cannot be written
//! - [`ImportError`] - top-level error returned by the pipeline
//!
//! Every stage error converts into [`ImportError`] via `From`, so `?` works
//! across stage boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading the source table.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to open or read the file.
    #[error("Cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file has no header row.
    #[error("CSV file is empty")]
    EmptyFile,

    /// Malformed CSV content.
    #[error("Invalid CSV at line {line}: {message}")]
    Parse { line: u64, message: String },
}

impl CsvError {
    pub(crate) fn from_csv(err: &csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        CsvError::Parse {
            line,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Schema Errors
// =============================================================================

/// The source table does not carry the required columns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// All missing column names, in canonical order.
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

impl SchemaError {
    /// Names of the missing columns.
    pub fn missing(&self) -> &[String] {
        match self {
            SchemaError::MissingColumns(cols) => cols,
        }
    }
}

// =============================================================================
// Empty Result
// =============================================================================

/// Expansion produced zero output rows.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("No records matched the module filter")]
pub struct EmptyResultError;

// =============================================================================
// Write Errors
// =============================================================================

/// Errors while writing the destination table.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Could not create or write the output file.
    #[error("Cannot write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV serialization failed.
    #[error("Cannot serialize CSV for '{}': {message}", .path.display())]
    Csv { path: PathBuf, message: String },
}

// =============================================================================
// Import Errors (top-level)
// =============================================================================

/// Top-level error returned by [`crate::transform::pipeline::run_import`].
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Error reading source file: {0}")]
    Csv(#[from] CsvError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    EmptyResult(#[from] EmptyResultError),

    #[error("Error writing destination file: {0}")]
    Write(#[from] WriteError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for reading the source table.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for writing the destination table.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for a whole import run.
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let csv_err = CsvError::EmptyFile;
        let import_err: ImportError = csv_err.into();
        assert!(import_err.to_string().contains("empty"));
        assert!(import_err.to_string().starts_with("Error reading source file"));

        let schema_err = SchemaError::MissingColumns(vec!["Category".into()]);
        let import_err: ImportError = schema_err.into();
        assert_eq!(import_err.to_string(), "Missing required column(s): Category");
    }

    #[test]
    fn test_schema_error_lists_every_column() {
        let err = SchemaError::MissingColumns(vec!["Unit".into(), "Stages".into()]);
        assert_eq!(err.to_string(), "Missing required column(s): Unit, Stages");
        assert_eq!(err.missing(), &["Unit".to_string(), "Stages".to_string()]);
    }

    #[test]
    fn test_empty_result_message() {
        let err: ImportError = EmptyResultError.into();
        assert_eq!(err.to_string(), "No records matched the module filter");
    }

    #[test]
    fn test_write_error_names_path() {
        let err = WriteError::Io {
            path: PathBuf::from("/nope/out.csv"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing directory"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nope/out.csv"));
        assert!(msg.contains("missing directory"));
    }
}
