// Unit tests for page loading (local sources only)

use super::*;
use crate::dom::DomTree;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

const PAGE: &str = "<html><body><p id=\"hello\">Hello</p></body></html>";

fn write_page(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("page.html");
    std::fs::write(&path, PAGE).unwrap();
    path
}

#[tokio::test]
async fn test_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_page(&dir);

    let html = load_html(&PageSource::File(path), &FetchMode::Http)
        .await
        .unwrap();
    assert_eq!(html, PAGE);
}

#[tokio::test]
async fn test_load_file_url_without_browser() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_page(&dir);
    let url = url::Url::from_file_path(&path).unwrap();

    let page = load_page(&PageSource::Url(url), &FetchMode::Http)
        .await
        .unwrap();
    let hello = page.find_all("#hello").unwrap();
    assert_eq!(hello.len(), 1);
    assert!(page.is_connected(hello[0]));
}

#[tokio::test]
async fn test_missing_file_is_a_page_load_error() {
    let source = PageSource::File(PathBuf::from("/definitely/not/here.html"));

    let err = load_html(&source, &FetchMode::Http).await.unwrap_err();
    let converted: CssprobeError = err.into();
    assert_eq!(converted.exit_code(), 6);
    assert!(converted.to_string().contains("/definitely/not/here.html"));
}

#[tokio::test]
async fn test_browser_mode_without_driver_fails() {
    let source = PageSource::parse("https://example.com/").unwrap();
    let mode = FetchMode::Browser {
        browser_type: BrowserType::Chrome,
        webdriver_url: Some("http://127.0.0.1:1".to_string()),
        headless: true,
    };

    let err = load_html(&source, &mode).await.unwrap_err();
    let converted: CssprobeError = err.into();
    assert_eq!(converted.exit_code(), 4);
}

#[tokio::test]
async fn test_non_utf8_file_is_decoded_lossily() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.html");
    std::fs::write(&path, b"<p id=\"cafe\">caf\xe9</p>").unwrap();

    let page = load_page(&PageSource::File(path), &FetchMode::Http)
        .await
        .unwrap();
    let cafe = page.find_all("#cafe").unwrap();
    assert_eq!(cafe.len(), 1);
    assert_eq!(page.text_content(cafe[0]).as_deref(), Some("caf\u{FFFD}"));
}
