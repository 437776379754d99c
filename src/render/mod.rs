//! Page rendering
//!
//! A [`PageRenderer`] drives one [`BrowserSession`] through the load cycle
//! (navigate, wait for `<body>`, let scripts settle, read the DOM) and hands
//! back a [`RenderedPage`] snapshot.

mod cache;
mod http;
mod session;
mod throttle;
mod webdriver;

pub use cache::{CachedResponse, ResponseCache};
pub use http::{build_http_client, HttpSession};
pub use session::{BrowserSession, SessionError};
pub use throttle::Throttle;
pub use webdriver::{build_capabilities, WebDriverSession};

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::config::{Config, Engine, RendererConfig};
use crate::page::RenderedPage;

/// Element whose presence marks a page as loaded
pub const READY_SELECTOR: &str = "body";

/// A page could not be loaded
#[derive(Debug, Error)]
#[error("Failed to render {url}: {cause}")]
pub struct RenderError {
    pub url: String,
    #[source]
    pub cause: SessionError,
}

/// Waits applied around every page load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderTimings {
    /// Upper bound on waiting for [`READY_SELECTOR`]
    pub ready_timeout: Duration,
    /// Fixed pause after the page is ready
    pub settle: Duration,
}

impl From<&RendererConfig> for RenderTimings {
    fn from(config: &RendererConfig) -> Self {
        Self {
            ready_timeout: config.ready_timeout(),
            settle: config.settle(),
        }
    }
}

/// Loads pages through a browser session
pub struct PageRenderer {
    session: Box<dyn BrowserSession>,
    timings: RenderTimings,
}

impl PageRenderer {
    pub fn new(session: Box<dyn BrowserSession>, timings: RenderTimings) -> Self {
        Self { session, timings }
    }

    pub fn timings(&self) -> RenderTimings {
        self.timings
    }

    /// Loads `url` and snapshots the resulting DOM
    ///
    /// # Returns
    ///
    /// * `Ok(RenderedPage)` - The page after it was ready and had settled
    /// * `Err(RenderError)` - Navigation failed, the page never became ready,
    ///   or the browser could not be read
    pub async fn render(&mut self, url: &Url) -> Result<RenderedPage, RenderError> {
        self.load(url).await.map_err(|cause| RenderError {
            url: url.to_string(),
            cause,
        })
    }

    async fn load(&mut self, url: &Url) -> Result<RenderedPage, SessionError> {
        self.session.navigate(url).await?;
        self.session
            .wait_for_element(READY_SELECTOR, self.timings.ready_timeout)
            .await?;

        if !self.timings.settle.is_zero() {
            tokio::time::sleep(self.timings.settle).await;
        }

        let final_url = self.session.current_url().await?;
        let title = self.session.title().await?;
        let source = self.session.page_source().await?;

        if final_url != *url {
            tracing::debug!("{} redirected to {}", url, final_url);
        }

        Ok(RenderedPage::parse(final_url, title, &source))
    }

    /// Releases the browser session
    pub async fn close(&mut self) -> Result<(), SessionError> {
        tracing::debug!("Closing {} session", self.session.name());
        self.session.close().await
    }
}

/// Opens the session selected by `config.renderer.engine`
pub async fn open_session(config: &Config) -> Result<Box<dyn BrowserSession>, SessionError> {
    let delay = config.crawler.download_delay();
    let user_agent = &config.user_agent.value;

    match config.renderer.engine {
        Engine::Webdriver => {
            let session = WebDriverSession::connect(&config.renderer, user_agent, delay).await?;
            Ok(Box::new(session))
        }
        Engine::Static => {
            let cache = config.cache.enabled.then(|| {
                ResponseCache::new(
                    config.cache.expiration(),
                    config.cache.directory.as_ref().map(PathBuf::from),
                )
            });
            tracing::info!(
                "Using static HTTP engine (cache: {})",
                if config.cache.enabled { "on" } else { "off" }
            );
            Ok(Box::new(HttpSession::new(user_agent, delay, cache)?))
        }
    }
}
