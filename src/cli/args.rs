use crate::config::ReportConfig;
use crate::core::UnknownStatusPolicy;
use crate::io::{InputFormat, NumberLocale};
use crate::render::OutputFormat;
use crate::types::ReportResult;
use clap::Parser;
use std::path::PathBuf;

/// Build credit statistics from an exported credit table
#[derive(Parser, Debug)]
#[command(name = "credit-report")]
#[command(about = "Build credit statistics from an exported credit table", long_about = None)]
pub struct CliArgs {
    /// Input file (HTML or CSV) containing the credit table
    #[arg(value_name = "INPUT", help = "Path to the input HTML or CSV file")]
    pub input_file: PathBuf,

    #[arg(
        long = "input-format",
        value_name = "FORMAT",
        help = "Input format: 'auto' (by extension), 'html' or 'csv'"
    )]
    pub input_format: Option<InputFormat>,

    #[arg(
        long = "output",
        value_name = "FORMAT",
        default_value = "text",
        help = "Report format: 'text' or 'json'"
    )]
    pub output: OutputFormat,

    /// Number format of the text report
    #[arg(
        long = "locale",
        value_name = "LOCALE",
        help = "Report number format: 'fr' (1 500,00), 'en' (1,500.00) or 'plain' (1500.00)"
    )]
    pub locale: Option<NumberLocale>,

    #[arg(
        long = "amount-locale",
        value_name = "LOCALE",
        help = "Number format of amounts in the input"
    )]
    pub amount_locale: Option<NumberLocale>,

    #[arg(long = "date-column", value_name = "N", help = "1-based date column")]
    pub date_column: Option<usize>,

    #[arg(long = "type-column", value_name = "N", help = "1-based credit type column")]
    pub type_column: Option<usize>,

    #[arg(long = "employee-column", value_name = "N", help = "1-based employee column")]
    pub employee_column: Option<usize>,

    #[arg(long = "status-column", value_name = "N", help = "1-based status column")]
    pub status_column: Option<usize>,

    /// Explicit amount column; without it the amount cell is detected by shape
    #[arg(long = "amount-column", value_name = "N", help = "1-based amount column")]
    pub amount_column: Option<usize>,

    #[arg(
        long = "date-format",
        value_name = "FMT",
        help = "chrono format of the date column (default: %d/%m/%Y %H:%M:%S)"
    )]
    pub date_format: Option<String>,

    #[arg(long = "delimiter", value_name = "CHAR", help = "CSV field delimiter")]
    pub delimiter: Option<char>,

    #[arg(long = "has-headers", help = "Treat the first CSV row as a header")]
    pub has_headers: bool,

    #[arg(
        long = "count-unknown",
        help = "Count credits with unrecognized statuses instead of dropping them"
    )]
    pub count_unknown: bool,

    #[arg(long = "config", value_name = "FILE", help = "JSON configuration file")]
    pub config_file: Option<PathBuf>,
}

impl CliArgs {
    /// Create a ReportConfig from CLI arguments
    ///
    /// Starts from the configuration file when one is given (defaults
    /// otherwise), then applies every flag that was set on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be read or parsed,
    /// or the resulting configuration is invalid.
    pub fn to_report_config(&self) -> ReportResult<ReportConfig> {
        let mut config = match &self.config_file {
            Some(path) => ReportConfig::from_file(path)?,
            None => ReportConfig::default(),
        };

        if let Some(format) = self.input_format {
            config.input_format = format;
        }
        if let Some(locale) = self.locale {
            config.output_locale = locale;
        }
        if let Some(locale) = self.amount_locale {
            config.amount_locale = locale;
        }

        let columns = &mut config.columns;
        if let Some(n) = self.date_column {
            columns.date = n;
        }
        if let Some(n) = self.type_column {
            columns.credit_type = n;
        }
        if let Some(n) = self.employee_column {
            columns.employee = n;
        }
        if let Some(n) = self.status_column {
            columns.status = n;
        }
        if self.amount_column.is_some() {
            columns.amount = self.amount_column;
        }

        if let Some(format) = &self.date_format {
            config.date_format = format.clone();
        }
        if let Some(delimiter) = self.delimiter {
            config.csv.delimiter = delimiter;
        }
        if self.has_headers {
            config.csv.has_headers = true;
        }
        if self.count_unknown {
            config.unknown_status = UnknownStatusPolicy::Count;
        }

        config.validate()?;
        Ok(config)
    }
}
