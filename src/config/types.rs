use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::url::parse_seed;
use crate::UrlResult;

/// Link text/href patterns that mark a link as pointing at an "about" page.
///
/// Matched case-insensitively; any single match qualifies the link.
pub const DEFAULT_ABOUT_PATTERNS: &[&str] = &[
    r"about\s*us",
    r"about",
    r"know\s*us",
    r"who\s*we\s*are",
    r"our\s*story",
    r"about\s*company",
    r"company\s*profile",
];

/// Desktop browser user agent sent unless the config overrides it
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";

/// Main configuration structure for About-Crawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Parses the configured seeds, dropping repeats so each homepage is
    /// crawled once. The first occurrence keeps its position.
    pub fn seed_urls(&self) -> UrlResult<Vec<Url>> {
        let mut seen = HashSet::new();
        let mut seeds = Vec::with_capacity(self.crawler.seeds.len());

        for raw in &self.crawler.seeds {
            let url = parse_seed(raw)?;
            if seen.insert(url.as_str().to_string()) {
                seeds.push(url);
            }
        }

        Ok(seeds)
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CrawlerConfig {
    /// Homepages to start from, visited in order
    pub seeds: Vec<String>,

    /// Minimum time between two page loads (milliseconds)
    #[serde(rename = "download-delay-ms", default = "default_download_delay_ms")]
    pub download_delay_ms: u64,
}

impl CrawlerConfig {
    pub fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }
}

/// Which backend loads pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// A real browser driven over the WebDriver protocol
    #[default]
    Webdriver,
    /// Plain HTTP fetches; scripts are not executed
    Static,
}

/// Browser launched behind the WebDriver endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Firefox,
    Chrome,
}

/// Page rendering configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RendererConfig {
    #[serde(default)]
    pub engine: Engine,

    /// WebDriver server (geckodriver, chromedriver, Selenium)
    #[serde(rename = "webdriver-url", default = "default_webdriver_url")]
    pub webdriver_url: String,

    #[serde(default)]
    pub browser: Browser,

    #[serde(default = "default_true")]
    pub headless: bool,

    #[serde(rename = "window-width", default = "default_window_width")]
    pub window_width: u32,

    #[serde(rename = "window-height", default = "default_window_height")]
    pub window_height: u32,

    /// How long to wait for `<body>` after navigation (seconds)
    #[serde(rename = "ready-timeout-secs", default = "default_ready_timeout_secs")]
    pub ready_timeout_secs: u64,

    /// Extra wait after the page is ready, for scripts to finish (milliseconds)
    #[serde(rename = "settle-ms", default = "default_settle_ms")]
    pub settle_ms: u64,
}

impl RendererConfig {
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            engine: Engine::default(),
            webdriver_url: default_webdriver_url(),
            browser: Browser::default(),
            headless: true,
            window_width: default_window_width(),
            window_height: default_window_height(),
            ready_timeout_secs: default_ready_timeout_secs(),
            settle_ms: default_settle_ms(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    #[serde(default = "default_user_agent")]
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

/// Response cache configuration (static engine)
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Entries older than this are refetched (seconds)
    #[serde(rename = "expiration-secs", default = "default_cache_expiration_secs")]
    pub expiration_secs: u64,

    /// Mirror entries to this directory so they survive restarts
    #[serde(default)]
    pub directory: Option<String>,
}

impl CacheConfig {
    pub fn expiration(&self) -> Duration {
        Duration::from_secs(self.expiration_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            expiration_secs: default_cache_expiration_secs(),
            directory: None,
        }
    }
}

/// About-link heuristics
#[derive(Debug, Clone, Deserialize)]
pub struct MatcherConfig {
    /// Regular expressions tried against an anchor's href and visible text
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON feed written at the end of the run
    #[serde(default = "default_output_path")]
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_download_delay_ms() -> u64 {
    2000
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_ready_timeout_secs() -> u64 {
    10
}

fn default_settle_ms() -> u64 {
    3000
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_cache_expiration_secs() -> u64 {
    86_400
}

fn default_patterns() -> Vec<String> {
    DEFAULT_ABOUT_PATTERNS.iter().map(|p| p.to_string()).collect()
}

fn default_output_path() -> String {
    "about_pages.json".to_string()
}
