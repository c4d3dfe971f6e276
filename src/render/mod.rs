//! Report rendering module
//!
//! This module defines the Strategy pattern for writing a finished
//! `CreditSummary`. The output format (human-readable text or JSON) is
//! selected at runtime.

use crate::io::NumberLocale;
use crate::types::{CreditSummary, ReportResult};
use clap::ValueEnum;
use std::io::Write;

pub mod json;
pub mod text;

pub use json::JsonRenderer;
pub use text::TextRenderer;

/// Renders a credit summary to a writer
///
/// Implementations only format; every number they print is already present
/// in the summary or derived from it with [`CreditSummary::share_of_total`].
pub trait ReportRenderer: Send + Sync {
    /// Write the report for `summary` to `output`
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written or the summary
    /// cannot be serialized.
    fn render(&self, summary: &CreditSummary, output: &mut dyn Write) -> ReportResult<()>;
}

/// Available report formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Create a renderer for the requested format
///
/// `locale` controls number formatting in the text report; JSON output
/// always carries plain decimal strings.
pub fn create_renderer(format: OutputFormat, locale: NumberLocale) -> Box<dyn ReportRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer::new(locale)),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
