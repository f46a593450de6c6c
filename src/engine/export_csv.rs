//! Write a sweep table as CSV: one row per save, one column per unit, plus a
//! roster total column.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::engine::sweep::{save_label, SweepTable};

#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Io(std::io::Error),
    Utf8(std::string::FromUtf8Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv(e) => write!(f, "{e}"),
            Self::Io(e) => write!(f, "{e}"),
            Self::Utf8(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

/// Render the table as a CSV string. Header: `save,<unit names...>,total`;
/// values carry four decimal places (display rounding happens here, never in
/// the engine).
pub fn sweep_to_csv(table: &SweepTable) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = Vec::with_capacity(table.unit_names.len() + 2);
    header.push("save".to_string());
    header.extend(table.unit_names.iter().cloned());
    header.push("total".to_string());
    writer.write_record(&header)?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(row.per_unit.len() + 2);
        record.push(save_label(row.save));
        record.extend(row.per_unit.iter().map(|value| format!("{value:.4}")));
        record.push(format!("{:.4}", row.total));
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(ExportError::Utf8)
}

/// Write the table to `path`, creating parent directories as needed.
pub fn write_sweep_csv(path: &str, table: &SweepTable) -> Result<(), ExportError> {
    let rendered = sweep_to_csv(table)?;
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).map_err(ExportError::Io)?;
    }
    fs::write(path, rendered).map_err(ExportError::Io)
}
