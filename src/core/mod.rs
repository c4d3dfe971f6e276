//! Core business logic module
//!
//! This module contains the report processing components:
//! - `status` - Status label translation
//! - `extractor` - Row extraction into typed records
//! - `aggregator` - Employee, product and status totals
//! - `date_range` - Period covered by the records
//! - `engine` - Report orchestration

pub mod aggregator;
pub mod date_range;
pub mod engine;
pub mod extractor;
pub mod status;

pub use aggregator::{CreditAggregator, Ingested};
pub use date_range::DateRangeFinder;
pub use engine::ReportEngine;
pub use extractor::{Extraction, RowExtractor};
pub use status::{StatusTranslator, UnknownStatusPolicy};
