//! In-memory tabular sources.
//!
//! Loaders consume a [`SourceBook`] rather than a live spreadsheet handle, so a
//! book can be inspected repeatedly (sheet selection probes several tables)
//! without re-reading the underlying file.

use serde::{Deserialize, Serialize};

/// A single cell value from a tabular source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Scalar {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Scalar {
    /// True for `Empty` and for text that is blank after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Scalar::Empty => true,
            Scalar::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Number(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::Text(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::Text(v)
    }
}

/// A named grid of scalars with a header row.
///
/// Reads outside the grid return [`Scalar::Empty`], so callers can probe
/// ragged rows without bounds bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Scalar>>,
}

impl RowTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<Scalar>>) -> Self {
        RowTable {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Index of the first header matching `name` (trimmed, case-insensitive).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim().to_uppercase();
        self.headers
            .iter()
            .position(|h| h.trim().to_uppercase() == wanted)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at (row, col), with out-of-bounds reads yielding `Empty`.
    pub fn cell(&self, row: usize, col: usize) -> &Scalar {
        static EMPTY: Scalar = Scalar::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }

    /// Cell at (row, column named `name`), or `Empty` when the column is absent.
    pub fn get(&self, row: usize, name: &str) -> &Scalar {
        match self.column_index(name) {
            Some(col) => self.cell(row, col),
            None => {
                static EMPTY: Scalar = Scalar::Empty;
                &EMPTY
            }
        }
    }
}

/// An ordered collection of named tables, one per source sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceBook {
    pub tables: Vec<RowTable>,
}

impl SourceBook {
    pub fn new() -> Self {
        SourceBook { tables: Vec::new() }
    }

    pub fn push(&mut self, table: RowTable) {
        self.tables.push(table);
    }

    /// First table whose name matches (trimmed, case-insensitive).
    pub fn table(&self, name: &str) -> Option<&RowTable> {
        let wanted = name.trim().to_lowercase();
        self.tables
            .iter()
            .find(|t| t.name.trim().to_lowercase() == wanted)
    }

    pub fn first(&self) -> Option<&RowTable> {
        self.tables.first()
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }
}
