//! HTML-backed table source
//!
//! Every `<tr>` element of the document becomes a row, and the row's `<td>`
//! and `<th>` children become its cells, in document order. Cell positions
//! therefore match the CSS `nth-child` numbering of the page.

use crate::io::table::TableSource;
use crate::types::{ReportError, ReportResult};
use scraper::{ElementRef, Html, Selector};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

static TR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("valid tr selector"));

/// Table extracted from the rows of an HTML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTable {
    rows: Vec<Vec<String>>,
}

impl HtmlTable {
    /// Load and parse an HTML file
    ///
    /// # Errors
    ///
    /// - `FileNotFound` if the path does not exist
    /// - `IoError` if the file cannot be read as UTF-8 text
    pub fn open(path: &Path) -> ReportResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ReportError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => ReportError::IoError {
                message: format!("Failed to read file '{}': {}", path.display(), e),
            },
        })?;

        Ok(Self::parse(&content))
    }

    /// Parse HTML markup
    ///
    /// The HTML parser is lenient, so this never fails; markup without any
    /// `<tr>` simply yields an empty table.
    pub fn parse(markup: &str) -> Self {
        let document = Html::parse_document(markup);

        let rows: Vec<Vec<String>> = document
            .select(&TR_SELECTOR)
            .map(|tr| {
                tr.children()
                    .filter_map(ElementRef::wrap)
                    .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                    .map(collect_text)
                    .collect()
            })
            .collect();

        log::debug!("Parsed {} HTML table rows", rows.len());
        HtmlTable { rows }
    }
}

/// Visible text of an element with whitespace runs collapsed
fn collect_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

impl TableSource for HtmlTable {
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
            .map(String::as_str)
    }
}
