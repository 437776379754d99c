//! WebDriver backend
//!
//! Drives a real browser (geckodriver by default, chromedriver supported)
//! through `fantoccini`, so pages run their scripts before being read.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::{json, Map, Value};
use url::Url;

use crate::config::{Browser, RendererConfig};
use crate::render::session::{BrowserSession, SessionError};
use crate::render::throttle::Throttle;

/// A live WebDriver session
pub struct WebDriverSession {
    client: Client,
    throttle: Throttle,
    closed: bool,
}

impl WebDriverSession {
    /// Starts a browser behind `config.webdriver_url`
    pub async fn connect(
        config: &RendererConfig,
        user_agent: &str,
        delay: Duration,
    ) -> Result<Self, SessionError> {
        let caps = build_capabilities(config, user_agent);

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await
            .map_err(|e| SessionError::Connect(format!("{}: {}", config.webdriver_url, e)))?;

        tracing::info!(
            "Started {:?} session via {} (headless: {})",
            config.browser,
            config.webdriver_url,
            config.headless
        );

        Ok(Self {
            client,
            throttle: Throttle::new(delay),
            closed: false,
        })
    }
}

/// Builds the W3C capabilities for the configured browser
pub fn build_capabilities(config: &RendererConfig, user_agent: &str) -> Map<String, Value> {
    let mut caps = Map::new();

    match config.browser {
        Browser::Firefox => {
            let mut args = vec![
                format!("--width={}", config.window_width),
                format!("--height={}", config.window_height),
            ];
            if config.headless {
                args.push("-headless".to_string());
            }

            caps.insert("browserName".to_string(), json!("firefox"));
            caps.insert(
                "moz:firefoxOptions".to_string(),
                json!({
                    "args": args,
                    "prefs": { "general.useragent.override": user_agent },
                }),
            );
        }
        Browser::Chrome => {
            let mut args = vec![
                "--disable-gpu".to_string(),
                format!(
                    "--window-size={},{}",
                    config.window_width, config.window_height
                ),
                format!("--user-agent={}", user_agent),
            ];
            if config.headless {
                args.push("--headless".to_string());
            }

            caps.insert("browserName".to_string(), json!("chrome"));
            caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
        }
    }

    caps
}

fn command_error(e: CmdError) -> SessionError {
    SessionError::Command(e.to_string())
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    fn name(&self) -> &'static str {
        "webdriver"
    }

    async fn navigate(&mut self, url: &Url) -> Result<(), SessionError> {
        self.throttle.wait().await;
        let result = self.client.goto(url.as_str()).await;
        self.throttle.record_request(Instant::now());
        result.map_err(command_error)
    }

    async fn wait_for_element(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), SessionError> {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(_) => Ok(()),
            Err(CmdError::WaitTimeout) => Err(SessionError::ReadyTimeout {
                selector: selector.to_string(),
                timeout,
            }),
            Err(e) => Err(command_error(e)),
        }
    }

    async fn current_url(&mut self) -> Result<Url, SessionError> {
        let current = self.client.current_url().await.map_err(command_error)?;
        Url::parse(current.as_str()).map_err(|e| SessionError::Command(e.to_string()))
    }

    async fn title(&mut self) -> Result<Option<String>, SessionError> {
        let title = self.client.title().await.map_err(command_error)?;
        Ok(Some(title).filter(|t| !t.trim().is_empty()))
    }

    async fn page_source(&mut self) -> Result<String, SessionError> {
        self.client.source().await.map_err(command_error)
    }

    async fn close(&mut self) -> Result<(), SessionError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.client.clone().close().await.map_err(command_error)
    }
}
