use geoaudit_browser::{ContentExtractor, FetchError};
use geoaudit_core::BrowserConfig;
use std::time::Duration;

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_extract_example_com() {
    let extractor = ContentExtractor::chromium(&BrowserConfig::default());

    let page = extractor
        .extract("https://example.com")
        .await
        .expect("extract example.com");

    assert_eq!(page.title, "Example Domain");
    assert!(!page.headings.is_empty());
    assert!(page.links.iter().all(|l| !l.href.is_empty()));
    assert!(!page.html.is_empty());
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed
async fn test_unresolvable_host_is_scrape_error() {
    let extractor = ContentExtractor::chromium(&BrowserConfig::default());

    let result = extractor.extract("https://does-not-exist.invalid/").await;
    assert!(matches!(result, Err(FetchError::Scrape(_))));
}

#[tokio::test]
#[ignore] // Requires Chrome/Chromium installed and network access
async fn test_tiny_timeout_is_scrape_timeout() {
    let extractor = ContentExtractor::chromium(&BrowserConfig::default())
        .with_timeout(Duration::from_millis(1));

    let result = extractor.extract("https://example.com").await;
    assert!(matches!(result, Err(FetchError::Timeout { .. })));
}
