//! CSV serialization for report tables.

use std::path::Path;

use csv::WriterBuilder;

use crate::error::{ReportError, Result};

/// Write a list of equal-length rows to a CSV file. The header row,
/// if wanted, must be the first row.
pub fn write_rows(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(ReportError::Csv)?;
    for row in rows {
        writer.write_record(row).map_err(ReportError::Csv)?;
    }
    writer.flush().map_err(|e| ReportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Write rows of varying length to a CSV file.
///
/// Used by the nexthop summary, which stacks several differently
/// shaped sections separated by blank lines. Empty rows are written
/// as a single empty field; the csv crate renders that as `""` to
/// keep the row distinguishable from a stray empty line, and
/// spreadsheet tools show it as an empty row.
pub fn write_rows_flexible(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(ReportError::Csv)?;

    let blank = [String::new()];
    for row in rows {
        let record: &[String] = if row.is_empty() { &blank } else { row };
        writer.write_record(record).map_err(ReportError::Csv)?;
    }
    writer.flush().map_err(|e| ReportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
