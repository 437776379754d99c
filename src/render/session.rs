//! Browser session abstraction

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

/// Faults raised by a browser backend
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to start browser session: {0}")]
    Connect(String),

    #[error("Browser command failed: {0}")]
    Command(String),

    #[error("Timed out after {timeout:?} waiting for '{selector}'")]
    ReadyTimeout { selector: String, timeout: Duration },

    #[error("Element '{0}' not present in page")]
    ElementMissing(String),

    #[error("Invalid selector '{0}'")]
    Selector(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("No page has been loaded")]
    NoPage,
}

/// One live browser, driven one page at a time.
///
/// The crawler owns exactly one session for the whole run and closes it on
/// every exit path.
#[async_trait]
pub trait BrowserSession: Send {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Loads `url` in the current tab
    async fn navigate(&mut self, url: &Url) -> Result<(), SessionError>;

    /// Waits until `selector` matches an element, giving up after `timeout`
    async fn wait_for_element(&mut self, selector: &str, timeout: Duration)
        -> Result<(), SessionError>;

    /// URL of the loaded page, after redirects
    async fn current_url(&mut self) -> Result<Url, SessionError>;

    /// Document title; `None` when the page has none
    async fn title(&mut self) -> Result<Option<String>, SessionError>;

    /// Serialized DOM of the loaded page
    async fn page_source(&mut self) -> Result<String, SessionError>;

    /// Releases the browser
    async fn close(&mut self) -> Result<(), SessionError>;
}
