//! Content extraction
//!
//! Turns a rendered about page into a [`PageRecord`]. The narrative text is
//! searched for in tiers, stopping at the first that yields enough:
//!
//! 1. the first known content container (`article`, `main`, ...) whose text
//!    is longer than [`SUBSTANTIAL_TEXT_CHARS`]; selectors are tried in
//!    priority order, the matches of each in document order
//! 2. every body element that is neither page chrome nor wraps page chrome,
//!    one line each, in document order
//! 3. the whole body text, when tier 2 came up short
//!
//! Whatever tier wins, the text is normalized before it is stored.

mod exclusion;
mod normalize;
mod selectors;

pub use exclusion::ExclusionSet;
pub use normalize::normalize_text;
pub use selectors::{NamedSelector, CONTENT_SELECTORS, NOISE_SELECTORS};

use scraper::ElementRef;
use thiserror::Error;
use url::Url;

use crate::output::PageRecord;
use crate::page::{visible_text, RenderedPage};

/// Text at or under this many characters is not "substantial".
///
/// A container must exceed it to be chosen; filtered body text below it
/// triggers the raw-body fallback.
pub const SUBSTANTIAL_TEXT_CHARS: usize = 100;

/// Errors that stop content extraction for one page
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Document has no body element")]
    MissingBody,
}

/// Which tier produced the text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    /// A content container matched by this selector
    Container(&'static str),
    /// Body elements with page chrome removed
    FilteredBody,
    /// The whole body text
    RawBody,
}

/// Text extracted from a page, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub text: String,
    pub source: ContentSource,
}

/// Extracts about-page text. Holds the compiled selector lists.
#[derive(Debug, Clone)]
pub struct ContentExtractor {
    noise: Vec<NamedSelector>,
    containers: Vec<NamedSelector>,
}

impl ContentExtractor {
    /// Compiles the built-in noise and content selectors
    pub fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            noise: selectors::compile_all(NOISE_SELECTORS)?,
            containers: selectors::compile_all(CONTENT_SELECTORS)?,
        })
    }

    /// Builds the record for a rendered page. Never fails: problems become an
    /// error record for `url`.
    pub fn extract(&self, page: &RenderedPage, url: &Url) -> PageRecord {
        self.extract_with_source(page, url).0
    }

    /// Like [`extract`](Self::extract), also reporting which tier produced
    /// the content (`None` for error records).
    pub fn extract_with_source(
        &self,
        page: &RenderedPage,
        url: &Url,
    ) -> (PageRecord, Option<ContentSource>) {
        match self.extract_content(page) {
            Ok(extracted) => {
                let content = normalize_text(&extracted.text);
                tracing::debug!(
                    "Extracted {} characters from {} via {:?}",
                    content.chars().count(),
                    url,
                    extracted.source
                );
                (
                    PageRecord::extracted(url, page.title(), content),
                    Some(extracted.source),
                )
            }
            Err(e) => {
                tracing::error!("Error extracting content from {}: {}", url, e);
                (PageRecord::failed(url, page.title(), e.to_string()), None)
            }
        }
    }

    /// Runs the tier search and returns the raw winning text
    pub fn extract_content(&self, page: &RenderedPage) -> Result<ExtractedContent, ExtractError> {
        if let Some((selector, text)) = self.find_container(page) {
            tracing::info!("Found main content using selector: {}", selector);
            return Ok(ExtractedContent {
                text,
                source: ContentSource::Container(selector),
            });
        }

        let body = page.body().ok_or(ExtractError::MissingBody)?;

        tracing::info!("No main content container found, extracting from body with filtering");
        let exclusion = ExclusionSet::compute(page.document(), &self.noise);
        let filtered = filtered_body_text(body, &exclusion);

        if filtered.chars().count() >= SUBSTANTIAL_TEXT_CHARS {
            return Ok(ExtractedContent {
                text: filtered,
                source: ContentSource::FilteredBody,
            });
        }

        tracing::info!("Filtered body text too short, falling back to full body text");
        Ok(ExtractedContent {
            text: visible_text(body),
            source: ContentSource::RawBody,
        })
    }

    /// First substantial container, trying selectors in priority order and
    /// each selector's matches in document order.
    fn find_container(&self, page: &RenderedPage) -> Option<(&'static str, String)> {
        self.containers.iter().find_map(|named| {
            page.select(&named.selector)
                .map(visible_text)
                .find(|text| text.chars().count() > SUBSTANTIAL_TEXT_CHARS)
                .map(|text| (named.source, text))
        })
    }
}

/// Text of every body descendant that is permitted by `exclusion` and renders
/// something, one entry per element, joined with `\n`.
///
/// Nested permitted elements each contribute their own text, so text can
/// repeat; normalization only folds adjacent repeats.
pub fn filtered_body_text(body: ElementRef<'_>, exclusion: &ExclusionSet) -> String {
    body.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|element| exclusion.permits(element.id()))
        .map(visible_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
