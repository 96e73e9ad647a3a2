//! Loading pages from files, stdin, HTTP or a live browser

use anyhow::Result;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::CssprobeError;
use crate::page::HtmlPage;
use crate::types::PageSource;
use crate::webdriver::{Browser, BrowserType};

/// How URL sources are fetched
#[derive(Debug, Clone)]
pub enum FetchMode {
    /// Render the page in a WebDriver browser and read its live DOM
    Browser {
        browser_type: BrowserType,
        webdriver_url: Option<String>,
        headless: bool,
    },
    /// Plain HTTP GET of the raw markup
    Http,
}

/// Load the HTML of a page source
pub async fn load_html(source: &PageSource, mode: &FetchMode) -> Result<String> {
    match source {
        PageSource::File(path) => read_file(path),
        PageSource::Stdin => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|e| CssprobeError::PageLoadFailed(format!("stdin: {}", e)))?;
            Ok(decode(bytes))
        }
        PageSource::Url(url) => match mode {
            FetchMode::Browser {
                browser_type,
                webdriver_url,
                headless,
            } => {
                let browser =
                    Browser::connect(*browser_type, webdriver_url.as_deref(), *headless).await?;
                let html = fetch_rendered(&browser, url.as_str()).await;
                // Always end the session, even when navigation failed
                if let Err(e) = browser.close().await {
                    debug!("Failed to close browser session: {}", e);
                }
                html
            }
            FetchMode::Http if url.scheme() == "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|_| CssprobeError::PageLoadFailed(format!("{}: not a local path", url)))?;
                read_file(&path)
            }
            FetchMode::Http => fetch_raw(url.as_str()).await,
        },
    }
}

/// Load and parse a page source
pub async fn load_page(source: &PageSource, mode: &FetchMode) -> Result<HtmlPage> {
    let html = load_html(source, mode).await?;
    debug!("Loaded {} bytes from {}", html.len(), source);
    Ok(HtmlPage::parse(&html))
}

fn read_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| CssprobeError::PageLoadFailed(format!("{}: {}", path.display(), e)))?;
    Ok(decode(bytes))
}

/// Invalid UTF-8 sequences become U+FFFD, as they do for HTTP bodies
fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(html) => html,
        Err(e) => {
            debug!("Page is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    }
}

async fn fetch_rendered(browser: &Browser, url: &str) -> Result<String> {
    browser.goto(url).await?;
    let html = browser.page_source().await?;
    info!("Captured DOM of {} from {:?}", url, browser.browser_type());
    Ok(html)
}

async fn fetch_raw(url: &str) -> Result<String> {
    info!("Fetching {}", url);
    let response = reqwest::get(url)
        .await
        .map_err(|e| CssprobeError::PageLoadFailed(format!("{}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CssprobeError::PageLoadFailed(format!("{}: HTTP {}", url, status)).into());
    }

    response.text().await.map_err(|e| {
        CssprobeError::PageLoadFailed(format!("{}: failed to read body: {}", url, e)).into()
    })
}

#[cfg(test)]
#[path = "source_test.rs"]
mod source_test;
