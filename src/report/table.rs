//! CSV report writer
//!
//! The table preserves insertion (fetch) order; sorting is strictly a chart
//! rendering detail and never touches this file.

use crate::record::SequenceRow;
use crate::Result;
use std::path::Path;

const HEADER: [&str; 3] = ["Accession", "Length", "Description"];

/// Writes extracted rows to a CSV file with the report header
///
/// Missing length/description values serialize as empty fields. The header
/// is written even when there are no rows.
pub fn write_csv(rows: &[SequenceRow], path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;

    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

/// Reads a report file back into rows
///
/// Empty length/description fields come back as `None`, so a write/read
/// cycle reproduces the original rows exactly.
pub fn read_csv(path: &Path) -> Result<Vec<SequenceRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}
