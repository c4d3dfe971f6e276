//! End-to-end report generation
//!
//! Ties the pieces together for one input file: load the table, summarize
//! it with the `ReportEngine`, and hand the summary to a renderer.

use crate::config::ReportConfig;
use crate::core::ReportEngine;
use crate::io::load_table;
use crate::render::ReportRenderer;
use crate::types::{CreditSummary, ReportResult};
use std::io::Write;
use std::path::Path;

/// Generate the report for `input` and write it to `output`
///
/// Returns the summary that was rendered so callers can inspect it.
///
/// # Errors
///
/// Fatal errors only: the input cannot be opened or parsed as a table, or
/// the report cannot be written. Malformed rows are skipped and logged.
///
/// # Examples
///
/// ```no_run
/// use credit_report::config::ReportConfig;
/// use credit_report::io::NumberLocale;
/// use credit_report::render::{create_renderer, OutputFormat};
/// use credit_report::report::generate_report;
/// use std::path::Path;
///
/// let config = ReportConfig::default();
/// let renderer = create_renderer(OutputFormat::Text, NumberLocale::Fr);
/// let mut output = std::io::stdout();
///
/// generate_report(Path::new("credits.html"), &config, renderer.as_ref(), &mut output)
///     .expect("Report failed");
/// ```
pub fn generate_report(
    input: &Path,
    config: &ReportConfig,
    renderer: &dyn ReportRenderer,
    output: &mut dyn Write,
) -> ReportResult<CreditSummary> {
    let table = load_table(input, config.input_format, config.csv)?;
    log::debug!(
        "Loaded {} rows from '{}'",
        table.row_count(),
        input.display()
    );

    let summary = ReportEngine::from_config(config).summarize(table.as_ref());

    renderer.render(&summary, output)?;
    output.flush()?;

    Ok(summary)
}
