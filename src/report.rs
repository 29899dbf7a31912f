//! Logical report model.
//!
//! Aggregation engines produce a [`ReportBook`] of sheets, rows, and cells;
//! rendering to an artifact is entirely a [`ReportSink`] concern. Cells carry
//! a display-format hint instead of pre-rendered text so sinks can apply real
//! number formats.

use crate::error::{DoiError, Result};
use serde::{Deserialize, Serialize};

/// A single report cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    #[default]
    Blank,
    Text(String),
    Number(f64),
}

/// Display precision class for numeric cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NumberFormat {
    #[default]
    General,
    /// Interest fractions, 8 decimal places.
    Nri,
    /// Net acre quantities, 6 decimal places.
    NetAcres,
    /// Gross acre quantities, 2 decimal places.
    GrossAcres,
}

impl NumberFormat {
    /// Spreadsheet-style format pattern, None for general formatting.
    pub fn pattern(&self) -> Option<&'static str> {
        match self {
            NumberFormat::General => None,
            NumberFormat::Nri => Some("0.00000000"),
            NumberFormat::NetAcres => Some("0.000000"),
            NumberFormat::GrossAcres => Some("0.00"),
        }
    }

    /// Renders a value at this format's precision.
    pub fn render(&self, value: f64) -> String {
        match self {
            NumberFormat::General => value.to_string(),
            NumberFormat::Nri => format!("{value:.8}"),
            NumberFormat::NetAcres => format!("{value:.6}"),
            NumberFormat::GrossAcres => format!("{value:.2}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Cell {
    pub value: CellValue,

    #[serde(default)]
    pub format: NumberFormat,
}

impl Cell {
    pub fn blank() -> Self {
        Cell::default()
    }

    pub fn text(value: impl Into<String>) -> Self {
        Cell {
            value: CellValue::Text(value.into()),
            format: NumberFormat::General,
        }
    }

    pub fn number(value: f64, format: NumberFormat) -> Self {
        Cell {
            value: CellValue::Number(value),
            format,
        }
    }

    /// NRI-precision numeric cell.
    pub fn nri(value: f64) -> Self {
        Cell::number(value, NumberFormat::Nri)
    }

    /// The cell as display text.
    pub fn render(&self) -> String {
        match &self.value {
            CellValue::Blank => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => self.format.render(*n),
        }
    }
}

/// Role of a row within a sheet. Sinks use this for emphasis (header fills,
/// bold totals) without re-deriving structure from cell contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    ColumnHeader,
    BlockLabel,
    Data,
    Totals,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub kind: RowKind,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(kind: RowKind, cells: Vec<Cell>) -> Self {
        Row { kind, cells }
    }

    pub fn blank() -> Self {
        Row {
            kind: RowKind::Blank,
            cells: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Row>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Widest row in the sheet.
    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }
}

/// An ordered collection of report sheets. `name` is the artifact stem
/// (e.g. "Tract_Based_Ownership"); sinks append their own extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportBook {
    pub name: String,
    pub sheets: Vec<Sheet>,
}

impl ReportBook {
    pub fn new(name: impl Into<String>) -> Self {
        ReportBook {
            name: name.into(),
            sheets: Vec::new(),
        }
    }

    pub fn push_sheet(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}

/// Owned sheet builder threaded by value through the aggregation engines,
/// so sheet construction never leans on shared mutable state.
#[derive(Debug)]
pub struct SheetBuilder {
    sheet: Sheet,
}

impl SheetBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        SheetBuilder {
            sheet: Sheet::new(name),
        }
    }

    pub fn row(mut self, kind: RowKind, cells: Vec<Cell>) -> Self {
        self.sheet.rows.push(Row::new(kind, cells));
        self
    }

    pub fn blank_row(mut self) -> Self {
        self.sheet.rows.push(Row::blank());
        self
    }

    pub fn column_headers(self, labels: &[&str]) -> Self {
        let cells = labels.iter().map(|l| Cell::text(*l)).collect();
        self.row(RowKind::ColumnHeader, cells)
    }

    /// A label/value pair row, as used by tract and owner info blocks.
    pub fn label_row(self, label: &str, value: Cell) -> Self {
        self.row(RowKind::BlockLabel, vec![Cell::text(label), value])
    }

    pub fn finish(self) -> Sheet {
        self.sheet
    }
}

/// Renders a report model into one artifact's bytes.
pub trait ReportSink {
    /// Extension of artifacts produced by this sink, without the dot.
    fn extension(&self) -> &'static str;

    fn render(&self, book: &ReportBook) -> Result<Vec<u8>>;

    fn file_name(&self, book: &ReportBook) -> String {
        format!("{}.{}", book.name, self.extension())
    }
}

/// Plain-text sink: each sheet becomes a `=== name ===` section of CSV rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSink;

impl ReportSink for CsvSink {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn render(&self, book: &ReportBook) -> Result<Vec<u8>> {
        if book.sheets.is_empty() {
            return Err(DoiError::Render(format!(
                "report '{}' has no sheets",
                book.name
            )));
        }
        let mut out = String::new();
        for sheet in &book.sheets {
            out.push_str(&format!("=== {} ===\n", sheet.name));
            for row in &sheet.rows {
                let line: Vec<String> = row.cells.iter().map(|c| escape_csv(&c.render())).collect();
                out.push_str(&line.join(","));
                out.push('\n');
            }
            out.push('\n');
        }
        Ok(out.into_bytes())
    }
}

fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_format_rendering() {
        assert_eq!(NumberFormat::Nri.render(0.125), "0.12500000");
        assert_eq!(NumberFormat::NetAcres.render(213.333333), "213.333333");
        assert_eq!(NumberFormat::GrossAcres.render(320.0), "320.00");
        assert_eq!(NumberFormat::General.render(1.5), "1.5");
    }

    #[test]
    fn test_format_patterns() {
        assert_eq!(NumberFormat::Nri.pattern(), Some("0.00000000"));
        assert_eq!(NumberFormat::NetAcres.pattern(), Some("0.000000"));
        assert_eq!(NumberFormat::GrossAcres.pattern(), Some("0.00"));
        assert_eq!(NumberFormat::General.pattern(), None);
    }

    #[test]
    fn test_builder_produces_expected_rows() {
        let sheet = SheetBuilder::new("LORI")
            .column_headers(&["OWNER", "TRACT"])
            .blank_row()
            .label_row("Tract No.:", Cell::text("1"))
            .row(RowKind::Data, vec![Cell::text("Jones"), Cell::nri(0.5)])
            .row(
                RowKind::Totals,
                vec![Cell::text("TOTALS"), Cell::nri(0.5)],
            )
            .finish();

        assert_eq!(sheet.rows.len(), 5);
        assert_eq!(sheet.rows[0].kind, RowKind::ColumnHeader);
        assert_eq!(sheet.rows[1].kind, RowKind::Blank);
        assert_eq!(sheet.rows[2].kind, RowKind::BlockLabel);
        assert_eq!(sheet.rows[3].kind, RowKind::Data);
        assert_eq!(sheet.rows[4].kind, RowKind::Totals);
        assert_eq!(sheet.width(), 2);
    }

    #[test]
    fn test_csv_sink_renders_sections_and_escapes() {
        let mut book = ReportBook::new("Demo");
        book.push_sheet(
            SheetBuilder::new("Tract List")
                .column_headers(&["TRACT", "LEGAL DESCRIPTION"])
                .row(
                    RowKind::Data,
                    vec![Cell::text("1"), Cell::text("N/2, \"Old\" Survey")],
                )
                .finish(),
        );

        let sink = CsvSink;
        let bytes = sink.render(&book).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("=== Tract List ===\n"));
        assert!(text.contains("TRACT,LEGAL DESCRIPTION"));
        assert!(text.contains("\"N/2, \"\"Old\"\" Survey\""));
        assert_eq!(sink.file_name(&book), "Demo.csv");
    }

    #[test]
    fn test_csv_sink_rejects_empty_book() {
        let book = ReportBook::new("Empty");
        assert!(CsvSink.render(&book).is_err());
    }

    #[test]
    fn test_book_round_trips_through_json() {
        let mut book = ReportBook::new("Unit_Based_DOI");
        book.push_sheet(
            SheetBuilder::new("Unit Recap")
                .column_headers(&["TRACT", "TOTAL NRI"])
                .row(
                    RowKind::Totals,
                    vec![Cell::text("UNIT NRI TOTAL"), Cell::nri(1.0)],
                )
                .finish(),
        );

        let json = serde_json::to_string(&book).unwrap();
        let back: ReportBook = serde_json::from_str(&json).unwrap();
        assert_eq!(back, book);
        assert_eq!(back.sheet("Unit Recap").unwrap().rows.len(), 2);
    }
}
