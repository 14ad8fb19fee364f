//! CSV reader for raw LCI tables, with byte-encoding auto-detection.
//!
//! Produces a generic [`Table`]; nothing here knows about LCI columns.
//! The delimiter is always `,` and quoting follows RFC 4180, so a quoted
//! `"A1, A2"` cell stays a single cell.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{CsvError, CsvResult};
use crate::models::Table;

const UTF8_BOM: char = '\u{feff}';

/// Result of reading a source file
#[derive(Debug, Clone)]
pub struct ParsedTable {
    /// Parsed table
    pub table: Table,
    /// Detected encoding
    pub encoding: String,
}

/// Detect the encoding of raw bytes.
///
/// Bytes that are valid UTF-8 are UTF-8; chardet is only consulted otherwise.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "" | "ascii" | "utf-8" | "utf8" | "utf-8-sig" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to a string using the given encoding.
///
/// Valid UTF-8 always decodes as UTF-8, whatever encoding is passed.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    match encoding.to_lowercase().as_str() {
        // WHATWG treats latin-1 labels as windows-1252
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        other => match encoding_rs::Encoding::for_label(other.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    }
}

/// Parse decoded CSV text into a [`Table`].
///
/// Rows shorter than the header are kept (missing cells read empty). A row
/// wider than the header, or a quoted field still open at end of input, is
/// a [`CsvError::Parse`].
///
/// # Example
/// ```
/// use simapro_import::parser::parse_table;
///
/// let table = parse_table("Activity,Stages\nSteel,\"A1, A2\"\n").unwrap();
/// assert_eq!(table.headers(), &["Activity", "Stages"]);
/// assert_eq!(table.rows()[0][1], "A1, A2");
/// ```
pub fn parse_table(content: &str) -> CsvResult<Table> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);

    // The csv reader closes an open quote at EOF without complaint
    if let Some(line) = unterminated_quote_line(content) {
        return Err(CsvError::Parse {
            line,
            message: "EOF inside quoted field".to_string(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CsvError::from_csv(&e))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() {
        return Err(CsvError::EmptyFile);
    }

    let mut table = Table::new(headers);

    for result in reader.records() {
        let record = result.map_err(|e| CsvError::from_csv(&e))?;

        // Blank lines between records
        if record.iter().all(|v| v.trim().is_empty()) && record.len() <= 1 {
            continue;
        }

        if record.len() > table.headers().len() {
            return Err(CsvError::Parse {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                message: format!(
                    "expected {} fields, saw {}",
                    table.headers().len(),
                    record.len()
                ),
            });
        }

        table.push_row(record.iter().map(str::to_string).collect());
    }

    Ok(table)
}

/// Line (1-based) of a quoted field left open at end of input, if any.
///
/// Mirrors the reader's quoting rules: a quote opens a quoted field only as
/// the first character of a field, `""` inside it is an escaped quote, and
/// quotes anywhere else are literal.
fn unterminated_quote_line(content: &str) -> Option<u64> {
    let mut line: u64 = 1;
    let mut field_start = true;
    let mut open_at: Option<u64> = None;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match open_at {
            Some(_) => {
                if c == '"' {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                    } else {
                        open_at = None;
                    }
                } else if c == '\n' {
                    line += 1;
                }
            }
            None => match c {
                '"' if field_start => {
                    open_at = Some(line);
                    field_start = false;
                }
                ',' | '\r' => field_start = true,
                '\n' => {
                    line += 1;
                    field_start = true;
                }
                _ => field_start = false,
            },
        }
    }

    open_at
}

/// Read a CSV file with encoding auto-detection.
pub fn read_table<P: AsRef<Path>>(path: P) -> CsvResult<ParsedTable> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| CsvError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_bytes(&bytes)
}

/// Parse raw CSV bytes with encoding auto-detection.
pub fn parse_bytes(bytes: &[u8]) -> CsvResult<ParsedTable> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    debug!(%encoding, bytes = bytes.len(), "decoded source");

    let table = parse_table(&content)?;

    Ok(ParsedTable { table, encoding })
}
