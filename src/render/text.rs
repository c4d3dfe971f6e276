//! Human-readable text report
//!
//! Layout:
//!
//! ```text
//! Credit period: 01.03.2024 - 05.03.2024
//!
//! Employee E1:
//!   Total amount: 1 500,00 (100,00%)
//!   Credits: 1
//!   Credit types:
//!     - Consumer: 1, amount: 1 500,00
//!
//! Total credits: 1
//! Total amount: 1 500,00
//!
//! Status breakdown:
//!   Issued: 1, amount: 1 500,00
//!   Closed: 0, amount: 0,00
//!   Cancelled: 1, amount: 2 000,00
//!
//! Product breakdown:
//!   Consumer: 1, amount: 1 500,00 (100,00%)
//! ```

use crate::io::NumberLocale;
use crate::render::ReportRenderer;
use crate::types::{CreditStatus, CreditSummary, DateRange, ReportResult, Tally};
use std::io::Write;

const PERIOD_FORMAT: &str = "%d.%m.%Y";

/// Writes the plain text report
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    locale: NumberLocale,
}

impl TextRenderer {
    pub fn new(locale: NumberLocale) -> Self {
        TextRenderer { locale }
    }

    fn amount(&self, tally: &Tally) -> String {
        format!("{}, amount: {}", tally.count, self.locale.format_amount(tally.amount))
    }

    fn share(&self, summary: &CreditSummary, tally: &Tally) -> String {
        format!(
            "{} ({}%)",
            self.amount(tally),
            self.locale.format_percent(summary.share_of_total(tally.amount))
        )
    }

    fn write_period(&self, period: Option<&DateRange>, output: &mut dyn Write) -> std::io::Result<()> {
        match period {
            Some(range) => writeln!(
                output,
                "Credit period: {} - {}",
                range.start.format(PERIOD_FORMAT),
                range.end.format(PERIOD_FORMAT)
            ),
            None => writeln!(output, "Credit period: n/a"),
        }
    }

    fn write_employees(&self, summary: &CreditSummary, output: &mut dyn Write) -> std::io::Result<()> {
        for (employee, stat) in &summary.employees {
            writeln!(output)?;
            writeln!(output, "Employee {}:", employee)?;
            writeln!(
                output,
                "  Total amount: {} ({}%)",
                self.locale.format_amount(stat.total_amount),
                self.locale.format_percent(summary.share_of_total(stat.total_amount))
            )?;
            writeln!(output, "  Credits: {}", stat.total_count)?;
            writeln!(output, "  Credit types:")?;
            for (credit_type, tally) in stat.active_types() {
                writeln!(output, "    - {}: {}", credit_type, self.amount(tally))?;
            }
        }
        Ok(())
    }

    fn write_statuses(&self, summary: &CreditSummary, output: &mut dyn Write) -> std::io::Result<()> {
        writeln!(output)?;
        writeln!(output, "Status breakdown:")?;
        for status in [
            CreditStatus::Issued,
            CreditStatus::Closed,
            CreditStatus::Cancelled,
            CreditStatus::Unknown,
        ] {
            let tally = summary.statuses.get(status);
            if status == CreditStatus::Unknown && tally.count == 0 {
                continue;
            }
            writeln!(output, "  {}: {}", status, self.amount(tally))?;
        }
        Ok(())
    }

    fn write_products(&self, summary: &CreditSummary, output: &mut dyn Write) -> std::io::Result<()> {
        writeln!(output)?;
        writeln!(output, "Product breakdown:")?;
        for (credit_type, tally) in &summary.products {
            writeln!(output, "  {}: {}", credit_type, self.share(summary, tally))?;
        }
        Ok(())
    }
}

impl ReportRenderer for TextRenderer {
    fn render(&self, summary: &CreditSummary, output: &mut dyn Write) -> ReportResult<()> {
        self.write_period(summary.period.as_ref(), output)?;
        self.write_employees(summary, output)?;

        writeln!(output)?;
        writeln!(output, "Total credits: {}", summary.total.count)?;
        writeln!(
            output,
            "Total amount: {}",
            self.locale.format_amount(summary.total.amount)
        )?;

        self.write_statuses(summary, output)?;
        self.write_products(summary, output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EmployeeStat;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn render(summary: &CreditSummary, locale: NumberLocale) -> String {
        let mut buffer = Vec::new();
        TextRenderer::new(locale).render(summary, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    fn single_issued() -> CreditSummary {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let tally = Tally::new(1, Decimal::new(1500, 0));

        let employee = EmployeeStat {
            total_amount: tally.amount,
            total_count: 1,
            by_type: BTreeMap::from([
                ("Auto".to_string(), Tally::default()),
                ("Consumer".to_string(), tally),
            ]),
        };

        let mut summary = CreditSummary {
            period: Some(DateRange::single(day)),
            employees: BTreeMap::from([("E1".to_string(), employee)]),
            products: BTreeMap::from([("Consumer".to_string(), tally)]),
            total: tally,
            ..Default::default()
        };
        summary.statuses.issued = tally;
        summary
    }

    #[test]
    fn test_render_single_issued() {
        let expected = "\
Credit period: 01.03.2024 - 01.03.2024

Employee E1:
  Total amount: 1 500,00 (100,00%)
  Credits: 1
  Credit types:
    - Consumer: 1, amount: 1 500,00

Total credits: 1
Total amount: 1 500,00

Status breakdown:
  Issued: 1, amount: 1 500,00
  Closed: 0, amount: 0,00
  Cancelled: 0, amount: 0,00

Product breakdown:
  Consumer: 1, amount: 1 500,00 (100,00%)
";
        assert_eq!(render(&single_issued(), NumberLocale::Fr), expected);
    }

    #[test]
    fn test_render_english_locale() {
        let output = render(&single_issued(), NumberLocale::En);

        assert!(output.contains("  Total amount: 1,500.00 (100.00%)\n"));
        assert!(output.contains("  Consumer: 1, amount: 1,500.00 (100.00%)\n"));
    }

    #[test]
    fn test_render_empty_summary() {
        let expected = "\
Credit period: n/a

Total credits: 0
Total amount: 0,00

Status breakdown:
  Issued: 0, amount: 0,00
  Closed: 0, amount: 0,00
  Cancelled: 0, amount: 0,00

Product breakdown:
";
        assert_eq!(render(&CreditSummary::default(), NumberLocale::Fr), expected);
    }

    #[test]
    fn test_render_unknown_status_line_when_counted() {
        let mut summary = single_issued();
        summary.statuses.unknown = Tally::new(2, Decimal::new(75050, 2));

        let output = render(&summary, NumberLocale::Fr);

        assert!(output.contains("  Unknown: 2, amount: 750,50\n"));
    }
}
