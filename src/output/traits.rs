//! Record sink trait and output errors

use crate::output::record::PageRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for page records.
///
/// The crawler hands each record over as soon as it exists, in the order
/// extractions finish.
pub trait RecordSink {
    /// Accepts one record
    fn write_record(&mut self, record: &PageRecord) -> OutputResult<()>;

    /// Flushes anything buffered. Called once when the crawl stops, including
    /// after an interrupt.
    fn finalize(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

impl RecordSink for Vec<PageRecord> {
    fn write_record(&mut self, record: &PageRecord) -> OutputResult<()> {
        self.push(record.clone());
        Ok(())
    }
}
