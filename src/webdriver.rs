use anyhow::{Context, Result};
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

use crate::errors::CssprobeError;

/// How long `goto` waits for `document.readyState` to become `complete`
const READY_TIMEOUT: Duration = Duration::from_secs(2);
const READY_POLL: Duration = Duration::from_millis(100);

/// Browser instance for WebDriver automation
pub struct Browser {
    client: Client,
    browser_type: BrowserType,
}

/// Supported browser types
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BrowserType {
    /// Mozilla Firefox
    Firefox,
    /// Google Chrome/Chromium
    Chrome,
}

impl std::str::FromStr for BrowserType {
    type Err = anyhow::Error;

    /// Parse browser type from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "firefox" => Ok(BrowserType::Firefox),
            "chrome" | "chromium" => Ok(BrowserType::Chrome),
            _ => Err(CssprobeError::InvalidArgument(format!("Unsupported browser: {}", s)).into()),
        }
    }
}

impl BrowserType {
    /// Default WebDriver URL for this browser type
    pub fn default_webdriver_url(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "http://localhost:4444",
            BrowserType::Chrome => "http://localhost:9515",
        }
    }

    pub fn driver_name(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "geckodriver",
            BrowserType::Chrome => "chromedriver",
        }
    }

    /// WebDriver capabilities for a fresh session
    pub fn capabilities(&self, headless: bool) -> serde_json::Map<String, serde_json::Value> {
        let mut caps = serde_json::Map::new();

        match self {
            BrowserType::Firefox => {
                let args: Vec<&str> = if headless { vec!["--headless"] } else { vec![] };
                caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
            }
            BrowserType::Chrome => {
                let mut args = vec!["--no-sandbox"];
                if headless {
                    args.extend(["--headless=new", "--disable-gpu", "--disable-dev-shm-usage"]);
                }
                caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
            }
        }

        caps
    }
}

impl Browser {
    /// Connect to a running WebDriver
    ///
    /// # Arguments
    /// * `browser_type` - Firefox or Chrome
    /// * `webdriver_url` - Driver endpoint, defaults to the browser's standard port
    /// * `headless` - Whether to run in headless mode
    pub async fn connect(
        browser_type: BrowserType,
        webdriver_url: Option<&str>,
        headless: bool,
    ) -> Result<Self> {
        let webdriver_url = webdriver_url.unwrap_or(browser_type.default_webdriver_url());
        info!("Connecting to {:?} WebDriver at {}", browser_type, webdriver_url);

        if !Self::is_webdriver_running(webdriver_url).await {
            let driver_name = browser_type.driver_name();
            anyhow::bail!(
                "Cannot connect to {} WebDriver at {}.\n\
                Please ensure {} is running:\n\
                  For Firefox: geckodriver --port 4444\n\
                  For Chrome: chromedriver --port 9515\n\
                Or point --webdriver-url at a running driver.",
                driver_name,
                webdriver_url,
                driver_name
            );
        }

        let client = ClientBuilder::rustls()
            .capabilities(browser_type.capabilities(headless))
            .connect(webdriver_url)
            .await
            .context("Failed to connect to WebDriver")?;

        Ok(Browser {
            client,
            browser_type,
        })
    }

    async fn is_webdriver_running(url: &str) -> bool {
        let status_url = format!("{}/status", url.trim_end_matches('/'));

        match reqwest::get(&status_url).await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("WebDriver status check failed: {}", e);
                false
            }
        }
    }

    pub fn browser_type(&self) -> BrowserType {
        self.browser_type
    }

    /// Navigate and wait for the page to finish loading
    pub async fn goto(&self, url: &str) -> Result<()> {
        info!("Navigating to {}", url);
        self.client
            .goto(url)
            .await
            .with_context(|| format!("WebDriver failed to navigate to {}", url))?;

        let ready_script = "return document.readyState === 'complete';";
        let deadline = tokio::time::Instant::now() + READY_TIMEOUT;

        while tokio::time::Instant::now() < deadline {
            match self.client.execute(ready_script, vec![]).await {
                Ok(val) if val.as_bool().unwrap_or(false) => return Ok(()),
                _ => tokio::time::sleep(READY_POLL).await,
            }
        }

        // Slow pages still get analyzed as they are
        debug!("Page not complete after {:?}, continuing", READY_TIMEOUT);
        Ok(())
    }

    /// Serialized DOM of the current page
    pub async fn page_source(&self) -> Result<String> {
        self.client
            .source()
            .await
            .context("Failed to read page source from WebDriver")
    }

    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "webdriver_test.rs"]
mod webdriver_test;
