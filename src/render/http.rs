//! Static HTTP backend
//!
//! Loads pages with a plain GET and treats the response body as the rendered
//! DOM. Scripts are not executed, so this suits script-free sites and tests.
//! Responses go through the [`ResponseCache`] when one is configured.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

use crate::render::cache::{CachedResponse, ResponseCache};
use crate::render::session::{BrowserSession, SessionError};
use crate::render::throttle::Throttle;

/// Builds an HTTP client that identifies with the configured user agent
///
/// # Arguments
///
/// * `user_agent` - Value of the `User-Agent` header
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Browser stand-in backed by `reqwest`
pub struct HttpSession {
    client: Client,
    throttle: Throttle,
    cache: Option<ResponseCache>,
    current: Option<CachedResponse>,
}

impl HttpSession {
    pub fn new(
        user_agent: &str,
        delay: Duration,
        cache: Option<ResponseCache>,
    ) -> Result<Self, SessionError> {
        Ok(Self {
            client: build_http_client(user_agent)?,
            throttle: Throttle::new(delay),
            cache,
            current: None,
        })
    }

    fn current(&self) -> Result<&CachedResponse, SessionError> {
        self.current.as_ref().ok_or(SessionError::NoPage)
    }

    /// Fetches `url` from the network, honouring the delay between requests
    async fn fetch(&mut self, url: &Url) -> Result<CachedResponse, SessionError> {
        self.throttle.wait().await;
        let response = self.client.get(url.clone()).send().await;
        self.throttle.record_request(Instant::now());

        let response = response?;
        let status = response.status();
        let final_url = response.url().clone();

        if !status.is_success() {
            return Err(SessionError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(CachedResponse::new(
            url.clone(),
            final_url,
            status.as_u16(),
            body,
        ))
    }
}

#[async_trait]
impl BrowserSession for HttpSession {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn navigate(&mut self, url: &Url) -> Result<(), SessionError> {
        // Leave no stale page behind if the load fails
        self.current = None;

        if let Some(cache) = self.cache.as_mut() {
            if let Some(hit) = cache.get(url) {
                tracing::debug!("Cache hit for {}", url);
                self.current = Some(hit);
                return Ok(());
            }
        }

        tracing::debug!("Fetching {}", url);
        let response = self.fetch(url).await?;

        if let Some(cache) = self.cache.as_mut() {
            cache.put(response.clone());
        }
        self.current = Some(response);
        Ok(())
    }

    async fn wait_for_element(
        &mut self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<(), SessionError> {
        // A static document never changes, so there is nothing to wait for
        if has_element(&self.current()?.body, selector)? {
            Ok(())
        } else {
            Err(SessionError::ElementMissing(selector.to_string()))
        }
    }

    async fn current_url(&mut self) -> Result<Url, SessionError> {
        Ok(self.current()?.final_url.clone())
    }

    async fn title(&mut self) -> Result<Option<String>, SessionError> {
        Ok(extract_title(&self.current()?.body))
    }

    async fn page_source(&mut self) -> Result<String, SessionError> {
        Ok(self.current()?.body.clone())
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        self.current = None;
        Ok(())
    }
}

fn has_element(source: &str, selector: &str) -> Result<bool, SessionError> {
    let parsed = Selector::parse(selector)
        .map_err(|e| SessionError::Selector(format!("{}: {:?}", selector, e)))?;
    let document = Html::parse_document(source);
    let found = document.select(&parsed).next().is_some();
    Ok(found)
}

/// Extracts the document title from raw HTML
fn extract_title(source: &str) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;
    let document = Html::parse_document(source);

    let title = document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty());
    title
}
