//! Content extraction: one isolated browser session per URL.

use crate::distill::distill;
use crate::driver::{DriverLauncher, PageDriver};
use crate::engine::ChromiumLauncher;
use crate::error::{FetchError, Result};
use geoaudit_core::{BrowserConfig, ScrapedPage};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default bound on reaching DOM-ready.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Navigates to pages and distills them into [`ScrapedPage`]s.
///
/// Every call launches its own session and releases it before returning,
/// whether extraction succeeded, timed out or failed. Nothing is retried.
#[derive(Clone)]
pub struct ContentExtractor {
    launcher: Arc<dyn DriverLauncher>,
    navigation_timeout: Duration,
}

impl ContentExtractor {
    pub fn new(launcher: Arc<dyn DriverLauncher>) -> Self {
        Self {
            launcher,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
        }
    }

    /// Extractor backed by headless Chromium, configured from `config`.
    pub fn chromium(config: &BrowserConfig) -> Self {
        let timeout = Duration::from_secs(config.navigation_timeout_secs);
        Self::new(Arc::new(ChromiumLauncher::new(config.clone()))).with_timeout(timeout)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    pub fn navigation_timeout(&self) -> Duration {
        self.navigation_timeout
    }

    /// Fetch `url` and distill its structure.
    ///
    /// `url` must already be a valid absolute URL.
    pub async fn extract(&self, url: &str) -> Result<ScrapedPage> {
        let started = Instant::now();
        tracing::info!(url = %url, "extracting page");

        let mut driver = self.launcher.launch().await?;
        let outcome = self.run(driver.as_mut(), url).await;
        driver.close().await;

        match &outcome {
            Ok(page) => tracing::info!(
                url = %url,
                headings = page.headings.len(),
                links = page.links.len(),
                images = page.images.len(),
                paragraphs = page.paragraphs.len(),
                elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                "page extracted"
            ),
            Err(e) => tracing::warn!(url = %url, "extraction failed: {}", e),
        }

        outcome
    }

    async fn run(&self, driver: &mut dyn PageDriver, url: &str) -> Result<ScrapedPage> {
        match tokio::time::timeout(self.navigation_timeout, driver.navigate(url)).await {
            Ok(navigated) => navigated?,
            Err(_) => {
                return Err(FetchError::Timeout {
                    url: url.to_string(),
                    timeout: self.navigation_timeout,
                })
            }
        }

        let document = driver.document().await?;
        let base = if document.url.is_empty() {
            url
        } else {
            document.url.as_str()
        };
        Ok(distill(&document.html, base))
    }
}
