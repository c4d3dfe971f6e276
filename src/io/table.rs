//! Tabular data sources
//!
//! The report never talks to a document API directly. Anything that can
//! answer "how many rows" and "what is the text of cell (row, col)" can feed
//! the row extractor: an in-memory matrix, a CSV file, or an HTML page.

/// Read-only access to a table of text cells
///
/// Row and column indices are zero-based. Rows may have different lengths;
/// `cell_text` returns `None` for cells that do not exist.
pub trait TableSource {
    /// Number of rows in the table
    fn row_count(&self) -> usize;

    /// Number of cells in a row (0 for rows out of range)
    fn cell_count(&self, row: usize) -> usize;

    /// Text of a cell, trimmed
    fn cell_text(&self, row: usize, col: usize) -> Option<&str>;

    /// Rows of the source document that could not be decoded into cells
    ///
    /// They are not part of `row_count`.
    fn unreadable_rows(&self) -> usize {
        0
    }
}

/// Table held entirely in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTable {
    rows: Vec<Vec<String>>,
}

impl MemoryTable {
    /// Create a table from owned rows
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        MemoryTable { rows }
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

impl TableSource for MemoryTable {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell_count(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    fn cell_text(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(|cell| cell.trim())
    }
}
