use crate::error::{DoiError, Result};
use crate::source::{RowTable, Scalar, SourceBook};
use crate::utils::clean_label;
use calamine::{open_workbook_auto, Data, Reader};
use log::info;
use std::path::Path;

/// Reads every sheet of an Excel workbook into a [`SourceBook`].
///
/// The first row of each sheet becomes the table's headers and the remaining
/// rows its body. Formats and formulas are not carried over; only cell values
/// matter to the loaders.
pub fn read_source_book(path: &Path) -> Result<SourceBook> {
    let mut workbook = open_workbook_auto(path).map_err(|e| {
        DoiError::Spreadsheet(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let sheet_names = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(DoiError::Spreadsheet(format!(
            "{} contains no sheets",
            path.display()
        )));
    }

    let mut book = SourceBook::new();
    for sheet_name in &sheet_names {
        let range = workbook.worksheet_range(sheet_name).map_err(|e| {
            DoiError::Spreadsheet(format!("Failed to read sheet '{}': {}", sheet_name, e))
        })?;

        let mut rows: Vec<Vec<Scalar>> = range
            .rows()
            .map(|row| row.iter().map(scalar_from).collect())
            .collect();
        let headers = if rows.is_empty() {
            Vec::new()
        } else {
            rows.remove(0).iter().map(clean_label).collect()
        };

        book.push(RowTable::new(sheet_name.clone(), headers, rows));
    }

    info!(
        "Read {} with {} sheets: {:?}",
        path.display(),
        book.tables.len(),
        book.table_names()
    );
    Ok(book)
}

fn scalar_from(cell: &Data) -> Scalar {
    match cell {
        Data::Empty => Scalar::Empty,
        Data::String(s) => Scalar::Text(s.clone()),
        Data::Float(n) => Scalar::Number(*n),
        Data::Int(n) => Scalar::Number(*n as f64),
        Data::Bool(b) => Scalar::Bool(*b),
        Data::Error(e) => Scalar::Text(format!("#{:?}", e)),
        Data::DateTime(dt) => Scalar::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Scalar::Text(s.clone()),
        Data::DurationIso(s) => Scalar::Text(s.clone()),
    }
}
