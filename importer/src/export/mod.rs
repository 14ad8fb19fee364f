//! CSV writer for the SimaPro import table.
//!
//! The destination is written as a whole-file operation: rows go to a
//! temporary file next to the destination, which is renamed over it only
//! once everything has been flushed. A failed run leaves no partial file.

use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{WriteError, WriteResult};
use crate::models::Table;

/// Serialize `table` (header first, no index column) into `writer`.
fn write_csv<W: Write>(table: &Table, writer: W) -> csv::Result<W> {
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(writer);

    wtr.write_record(table.headers())?;
    for row in table.rows() {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    wtr.into_inner().map_err(|e| e.into_error().into())
}

/// Render `table` as CSV text.
pub fn to_csv_string(table: &Table) -> Result<String, WriteError> {
    let bytes = write_csv(table, Vec::new()).map_err(|e| WriteError::Csv {
        path: PathBuf::from("<memory>"),
        message: e.to_string(),
    })?;

    String::from_utf8(bytes).map_err(|e| WriteError::Csv {
        path: PathBuf::from("<memory>"),
        message: e.to_string(),
    })
}

/// Write `table` to `destination`, replacing any existing file.
pub fn write_table(table: &Table, destination: &Path) -> WriteResult<()> {
    let io_err = |source: std::io::Error| WriteError::Io {
        path: destination.to_path_buf(),
        source,
    };

    let dir = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    debug!(tmp = %tmp.path().display(), "writing output to temporary file");

    let tmp = write_csv(table, tmp).map_err(|e| match e.into_kind() {
        csv::ErrorKind::Io(source) => io_err(source),
        other => WriteError::Csv {
            path: destination.to_path_buf(),
            message: format!("{:?}", other),
        },
    })?;

    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(destination).map_err(|e| io_err(e.error))?;

    Ok(())
}
