//! Output module for page records
//!
//! This module handles:
//! - The flat record emitted for every extraction attempt
//! - Sinks that receive records (the JSON feed, or a plain `Vec` in tests)
//! - Run statistics logged when the crawl ends

mod json;
mod record;
pub mod stats;
mod traits;

pub use json::JsonFeed;
pub use record::{PageOutcome, PageRecord, PageType, SCRAPED_AT_FORMAT};
pub use stats::CrawlStatistics;
pub use traits::{OutputError, OutputResult, RecordSink};
