//! Run statistics
//!
//! Counters kept by the crawler while it works and logged once at the end.

use crate::extract::ContentSource;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Seeds the crawler started on
    pub seeds_processed: u64,

    /// Seeds whose homepage could not be rendered
    pub seeds_failed: u64,

    /// Seeds without any about link, extracted from the homepage itself
    pub seeds_self_extracted: u64,

    /// About links accepted across all seeds
    pub candidates_found: u64,

    /// Candidates dropped because an earlier one already claimed the URL
    pub duplicates_suppressed: u64,

    /// Pages that failed to load (homepages and about pages)
    pub render_failures: u64,

    /// Records handed to the sink
    pub records_written: u64,

    /// Of those, records carrying an error instead of content
    pub error_records: u64,

    /// Records whose text came from a known content container
    pub from_container: u64,

    /// Records whose text came from the body with page chrome removed
    pub from_filtered_body: u64,

    /// Records that fell back to the whole body text
    pub from_raw_body: u64,
}

impl CrawlStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a written record and, when known, the tier that produced it
    pub fn record_written(&mut self, is_error: bool, source: Option<&ContentSource>) {
        self.records_written += 1;
        if is_error {
            self.error_records += 1;
        }

        match source {
            Some(ContentSource::Container(_)) => self.from_container += 1,
            Some(ContentSource::FilteredBody) => self.from_filtered_body += 1,
            Some(ContentSource::RawBody) => self.from_raw_body += 1,
            None => {}
        }
    }

    /// Share of written records that carry content, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.records_written == 0 {
            return 0.0;
        }
        ((self.records_written - self.error_records) as f64 / self.records_written as f64) * 100.0
    }

    /// Logs the statistics in a readable block
    pub fn log_summary(&self) {
        tracing::info!("=== Crawl Statistics ===");
        tracing::info!(
            "Seeds: {} processed, {} failed, {} without about links",
            self.seeds_processed,
            self.seeds_failed,
            self.seeds_self_extracted
        );
        tracing::info!(
            "About links: {} found, {} duplicates suppressed",
            self.candidates_found,
            self.duplicates_suppressed
        );
        tracing::info!("Render failures: {}", self.render_failures);
        tracing::info!(
            "Records: {} written, {} errors ({:.1}% success)",
            self.records_written,
            self.error_records,
            self.success_rate()
        );
        tracing::info!(
            "Content sources: {} container, {} filtered body, {} raw body",
            self.from_container,
            self.from_filtered_body,
            self.from_raw_body
        );
    }
}
