use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::output::record::PageRecord;
use crate::output::traits::{OutputResult, RecordSink};

/// JSON array feed written once, when the crawl finishes.
///
/// Records are buffered in arrival order and the file is replaced on
/// [`RecordSink::finalize`], pretty-printed with four-space indentation.
#[derive(Debug)]
pub struct JsonFeed {
    path: PathBuf,
    records: Vec<PageRecord>,
}

impl JsonFeed {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            records: Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    /// Serializes the buffered records
    pub fn render(&self) -> OutputResult<Vec<u8>> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        self.records.serialize(&mut serializer)?;
        buffer.push(b'\n');
        Ok(buffer)
    }
}

impl RecordSink for JsonFeed {
    fn write_record(&mut self, record: &PageRecord) -> OutputResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finalize(&mut self) -> OutputResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(&self.path, self.render()?)?;
        tracing::info!(
            "Wrote {} records to {}",
            self.records.len(),
            self.path.display()
        );
        Ok(())
    }
}
