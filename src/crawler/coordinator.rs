//! Crawler coordinator - main crawl orchestration logic
//!
//! For every seed, in order:
//! - render the homepage
//! - collect its about links and claim them in the visited set
//! - render and extract each about page, or the homepage itself when it has
//!   no about links
//!
//! Records go to the sink as soon as each extraction finishes. The browser
//! session is released on every exit path: completion, error, panic and
//! Ctrl-C.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use url::Url;

use crate::config::Config;
use crate::crawler::visited::VisitedSet;
use crate::extract::ContentExtractor;
use crate::links::{AnchorCandidate, LinkMatcher};
use crate::output::{CrawlStatistics, JsonFeed, PageRecord, RecordSink};
use crate::page::RenderedPage;
use crate::render::{open_session, PageRenderer, RenderTimings};
use crate::state::SeedState;
use crate::url::netloc;
use crate::CrawlError;

/// Main crawler structure
pub struct Crawler {
    renderer: PageRenderer,
    matcher: LinkMatcher,
    extractor: ContentExtractor,
    visited: VisitedSet,
    stats: CrawlStatistics,
}

impl Crawler {
    pub fn new(renderer: PageRenderer, matcher: LinkMatcher, extractor: ContentExtractor) -> Self {
        Self {
            renderer,
            matcher,
            extractor,
            visited: VisitedSet::new(),
            stats: CrawlStatistics::new(),
        }
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn statistics(&self) -> &CrawlStatistics {
        &self.stats
    }

    /// Crawls every seed in order, writing records to `sink`.
    ///
    /// A seed that fails to render is logged and skipped. Only sink failures
    /// stop the run.
    pub async fn run(&mut self, seeds: &[Url], sink: &mut dyn RecordSink) -> Result<(), CrawlError> {
        tracing::info!("Starting crawl of {} seeds", seeds.len());
        let start_time = std::time::Instant::now();

        for (index, seed) in seeds.iter().enumerate() {
            let written = self.crawl_seed(seed, sink).await?;
            tracing::info!(
                "Seed {}/{} done: {} ({} records)",
                index + 1,
                seeds.len(),
                seed,
                written
            );
        }

        tracing::info!(
            "Crawl finished in {:.1}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(())
    }

    /// Runs one seed through its lifecycle and returns how many records it
    /// produced
    pub async fn crawl_seed(
        &mut self,
        seed: &Url,
        sink: &mut dyn RecordSink,
    ) -> Result<usize, CrawlError> {
        let mut state = SeedState::Seed;
        self.stats.seeds_processed += 1;

        tracing::info!("Visiting main page: {}", seed);
        let page = match self.renderer.render(seed).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Error processing main page {}: {}", seed, e.cause);
                self.stats.seeds_failed += 1;
                self.stats.render_failures += 1;
                state.transition(SeedState::Done)?;
                return Ok(0);
            }
        };
        state = state.transition(SeedState::Rendered)?;

        let batch = self.claim_candidates(&page);

        if batch.is_empty() {
            state = state.transition(SeedState::NoCandidates)?;
            tracing::warn!(
                "No about links found on {}. Extracting from the main page itself.",
                seed
            );

            if !self.visited.insert(seed) {
                tracing::info!("{} was already extracted, skipping", seed);
                state.transition(SeedState::Done)?;
                return Ok(0);
            }

            state = state.transition(SeedState::ExtractSeedItself)?;
            self.stats.seeds_self_extracted += 1;
            let (record, source) = self.extractor.extract_with_source(&page, seed);
            self.emit(record, source, sink)?;
            state.transition(SeedState::Done)?;
            return Ok(1);
        }

        state = state.transition(SeedState::AboutCandidatesFound)?;
        tracing::info!("Found {} about page links on {}", batch.len(), seed);
        drop(page);

        state = state.transition(SeedState::ExtractEach)?;
        let mut written = 0;
        for candidate in &batch {
            if self.process_candidate(candidate, sink).await? {
                written += 1;
            }
        }

        state.transition(SeedState::Done)?;
        Ok(written)
    }

    /// Finds the seed's about links and claims each URL in the visited set.
    ///
    /// The origin is the host the seed finally landed on, the same URL its
    /// relative links resolve against. Repeats within the batch are dropped
    /// here, so no URL is dispatched twice even when several anchors point
    /// at it.
    fn claim_candidates(&mut self, page: &RenderedPage) -> Vec<AnchorCandidate> {
        let Some(origin) = netloc(page.url()) else {
            tracing::warn!("Page {} has no host, skipping link discovery", page.url());
            return Vec::new();
        };

        let found = self.matcher.find_about_links(page, &origin, &self.visited);

        let mut batch = Vec::with_capacity(found.len());
        for candidate in found {
            if self.visited.insert(&candidate.href) {
                batch.push(candidate);
            } else {
                tracing::debug!("Duplicate about link {} suppressed", candidate.href);
                self.stats.duplicates_suppressed += 1;
            }
        }

        self.stats.candidates_found += batch.len() as u64;
        batch
    }

    /// Renders and extracts one about page. Returns false when the page
    /// could not be loaded; no record is written in that case.
    async fn process_candidate(
        &mut self,
        candidate: &AnchorCandidate,
        sink: &mut dyn RecordSink,
    ) -> Result<bool, CrawlError> {
        tracing::info!("Processing about page: {}", candidate.href);

        match self.renderer.render(&candidate.href).await {
            Ok(page) => {
                let (record, source) = self.extractor.extract_with_source(&page, &candidate.href);
                self.emit(record, source, sink)?;
                Ok(true)
            }
            Err(e) => {
                tracing::error!("Error processing about page {}: {}", candidate.href, e.cause);
                self.stats.render_failures += 1;
                Ok(false)
            }
        }
    }

    fn emit(
        &mut self,
        record: PageRecord,
        source: Option<crate::extract::ContentSource>,
        sink: &mut dyn RecordSink,
    ) -> Result<(), CrawlError> {
        self.stats.record_written(record.is_error(), source.as_ref());
        sink.write_record(&record)?;
        Ok(())
    }

    /// Releases the browser session and returns the final statistics
    pub async fn shutdown(mut self) -> CrawlStatistics {
        if let Err(e) = self.renderer.close().await {
            tracing::warn!("Failed to close browser session cleanly: {}", e);
        }
        self.stats
    }
}

/// Runs a crawl from a loaded configuration
///
/// Opens the browser session, crawls every seed, and writes the JSON feed.
/// Ctrl-C stops the crawl early; the session is still closed and the
/// records gathered so far are still written. A panic inside the crawl is
/// re-raised after the same cleanup.
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Crawl finished (or was interrupted) cleanly
/// * `Err(CrawlError)` - Setup failed or the output could not be written
pub async fn run_crawl(config: Config) -> Result<CrawlStatistics, CrawlError> {
    let seeds = config.seed_urls()?;
    let matcher = LinkMatcher::from_config(&config.matcher)?;
    let extractor = ContentExtractor::new()?;

    let session = open_session(&config).await?;
    let renderer = PageRenderer::new(session, RenderTimings::from(&config.renderer));
    let mut crawler = Crawler::new(renderer, matcher, extractor);
    let mut feed = JsonFeed::new(&config.output.path);

    let outcome = {
        let crawl = AssertUnwindSafe(crawler.run(&seeds, &mut feed)).catch_unwind();
        tokio::select! {
            outcome = crawl => outcome,
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("Interrupted, stopping crawl");
                Ok(Ok(()))
            }
        }
    };

    let stats = crawler.shutdown().await;
    let written = feed.finalize();

    let result = match outcome {
        Ok(result) => result,
        Err(panic) => {
            tracing::error!("Crawl panicked, browser session released");
            std::panic::resume_unwind(panic);
        }
    };

    result?;
    written?;
    stats.log_summary();
    Ok(stats)
}
