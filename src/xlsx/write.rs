use crate::error::{DoiError, Result};
use crate::report::{CellValue, ReportBook, ReportSink, RowKind, Sheet};
use log::info;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::{Path, PathBuf};

/// Renders a [`ReportBook`] to `.xlsx` bytes.
///
/// Header, block-label, and totals rows are written bold; numeric cells carry
/// the number format their [`NumberFormat`](crate::report::NumberFormat)
/// hint names.
#[derive(Debug, Default, Clone)]
pub struct XlsxSink;

impl XlsxSink {
    pub fn new() -> Self {
        XlsxSink
    }
}

impl ReportSink for XlsxSink {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn render(&self, book: &ReportBook) -> Result<Vec<u8>> {
        if book.sheets.is_empty() {
            return Err(DoiError::Render(format!(
                "Report '{}' contains no sheets",
                book.name
            )));
        }

        let mut workbook = Workbook::new();
        for sheet in &book.sheets {
            let worksheet = workbook.add_worksheet().set_name(&sheet.name).map_err(|e| {
                DoiError::Spreadsheet(format!("Failed to create sheet '{}': {}", sheet.name, e))
            })?;
            write_sheet(worksheet, sheet)?;
        }

        workbook
            .save_to_buffer()
            .map_err(|e| DoiError::Spreadsheet(format!("Failed to render workbook: {}", e)))
    }
}

/// Renders `book` through an [`XlsxSink`] and writes it under `dir`.
pub fn save_report(book: &ReportBook, dir: &Path) -> Result<PathBuf> {
    let sink = XlsxSink::new();
    let bytes = sink.render(book)?;
    let path = dir.join(sink.file_name(book));
    std::fs::write(&path, bytes)?;
    info!("Wrote {}", path.display());
    Ok(path)
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> Result<()> {
    for (row_idx, row) in sheet.rows.iter().enumerate() {
        let emphasized = matches!(
            row.kind,
            RowKind::ColumnHeader | RowKind::BlockLabel | RowKind::Totals
        );

        for (col_idx, cell) in row.cells.iter().enumerate() {
            let mut format = Format::new();
            if emphasized {
                format = format.set_bold();
            }
            if let Some(pattern) = cell.format.pattern() {
                format = format.set_num_format(pattern);
            }

            let outcome = match &cell.value {
                CellValue::Blank => continue,
                CellValue::Text(s) if s.is_empty() => continue,
                CellValue::Text(s) => {
                    worksheet.write_string_with_format(row_idx as u32, col_idx as u16, s, &format)
                }
                CellValue::Number(n) => {
                    worksheet.write_number_with_format(row_idx as u32, col_idx as u16, *n, &format)
                }
            };
            outcome.map_err(|e| {
                DoiError::Spreadsheet(format!(
                    "Failed to write cell ({}, {}) in '{}': {}",
                    row_idx, col_idx, sheet.name, e
                ))
            })?;
        }
    }
    Ok(())
}
