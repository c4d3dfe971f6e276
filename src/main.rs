//! Credit Report CLI
//!
//! Command-line interface for building credit statistics from an exported
//! credit table.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- credits.html
//! cargo run -- --output json credits.html > report.json
//! cargo run -- --input-format csv --amount-column 10 --delimiter ';' credits.txt
//! RUST_LOG=debug cargo run -- --config layout.json credits.html
//! ```
//!
//! The report goes to stdout; diagnostics go to stderr through `env_logger`.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid configuration, file not found, file not readable, etc.)

use credit_report::cli;
use credit_report::render;
use credit_report::report::generate_report;
use std::process;

fn main() {
    env_logger::init();

    let args = cli::parse_args();

    let config = match args.to_report_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let renderer = render::create_renderer(args.output, config.output_locale);

    let mut output = std::io::stdout().lock();
    if let Err(e) = generate_report(&args.input_file, &config, renderer.as_ref(), &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
