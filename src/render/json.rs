//! JSON report output

use crate::render::ReportRenderer;
use crate::types::{CreditSummary, ReportResult};
use std::io::Write;

/// Writes the summary as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, summary: &CreditSummary, output: &mut dyn Write) -> ReportResult<()> {
        serde_json::to_writer_pretty(&mut *output, summary)?;
        writeln!(output)?;
        Ok(())
    }
}
