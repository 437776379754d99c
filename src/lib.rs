//! About-Crawler: finds and extracts "About Us" pages
//!
//! This crate visits a list of seed websites in a real browser, follows the
//! links that look like "about" pages, and extracts their narrative text into
//! flat JSON records.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod links;
pub mod output;
pub mod page;
pub mod render;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for About-Crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser session error: {0}")]
    Session(#[from] render::SessionError),

    #[error("Extractor setup error: {0}")]
    Extract(#[from] extract::ExtractError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::SeedState,
        to: state::SeedState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid link pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Crawler, VisitedSet};
pub use extract::{ContentExtractor, ContentSource};
pub use links::{AboutPatternSet, AnchorCandidate, LinkMatcher};
pub use output::{CrawlStatistics, PageRecord, PageType, RecordSink};
pub use page::RenderedPage;
pub use render::{BrowserSession, PageRenderer, RenderError};
pub use state::SeedState;
