//! CSV export of section records

use crate::output::record::SectionRecord;
use crate::CatalogError;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Exported columns, in order
pub const COLUMNS: [&str; 9] = [
    "school",
    "title",
    "topic",
    "time",
    "custom_minutes_per_week",
    "location",
    "requirements",
    "description_evaluation_method",
    "description_overview",
];

/// Result of a completed export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of data rows written (header excluded)
    pub rows: usize,

    /// Keys observed on records but not exported
    pub unused_keys: BTreeSet<String>,
}

/// Keys present on any record that are not part of the exported columns
pub fn unused_keys(records: &[SectionRecord]) -> BTreeSet<String> {
    records
        .iter()
        .flat_map(|record| record.keys())
        .filter(|key| !COLUMNS.contains(key))
        .map(str::to_string)
        .collect()
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Writes a single CSV row
pub fn write_row<W: Write, S: AsRef<str>>(w: &mut W, row: &[S]) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            w.write_all(b",")?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            w.write_all(cell.as_bytes())?;
        }
    }
    w.write_all(b"\n")
}

/// Writes the header and one row per record, in record order
///
/// Keys outside `COLUMNS` are ignored; missing keys become empty cells.
pub fn write_csv<W: Write>(w: &mut W, records: &[SectionRecord]) -> io::Result<()> {
    write_row(w, &COLUMNS)?;

    for record in records {
        let fields = record.fields();
        let row: Vec<&str> = COLUMNS
            .iter()
            .map(|column| {
                fields
                    .iter()
                    .find(|(key, _)| key == column)
                    .map(|(_, value)| value.as_str())
                    .unwrap_or("")
            })
            .collect();
        write_row(w, &row)?;
    }

    Ok(())
}

/// Exports records to a CSV file, creating parent directories as needed
///
/// # Returns
///
/// * `Ok(ExportSummary)` - Rows written and the unused-keys diagnostic
/// * `Err(CatalogError::OutputIo)` - The file could not be written
pub fn export_csv(records: &[SectionRecord], path: &Path) -> Result<ExportSummary, CatalogError> {
    let io_err = |source: io::Error| CatalogError::OutputIo {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, records).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(ExportSummary {
        rows: records.len(),
        unused_keys: unused_keys(records),
    })
}
