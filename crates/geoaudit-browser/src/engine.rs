use crate::driver::{DriverLauncher, PageDriver, RenderedDocument};
use crate::error::{FetchError, Result};
use crate::filter::{Decision, ResourceFilter};
use crate::fingerprint::Fingerprint;
use chromiumoxide::browser::{Browser, BrowserConfig as ChromeConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::fetch::{
    ContinueRequestParams, EnableParams, EventRequestPaused, FailRequestParams, RequestId,
    RequestPattern, RequestStage,
};
use chromiumoxide::cdp::browser_protocol::network::{ErrorReason, ResourceType};
use chromiumoxide::cdp::browser_protocol::page::{EventDomContentEventFired, NavigateParams};
use chromiumoxide::Page;
use futures_util::stream::StreamExt;
use geoaudit_core::BrowserConfig;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Launches a dedicated headless Chromium per extraction.
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    config: BrowserConfig,
    filter: Arc<ResourceFilter>,
}

impl ChromiumLauncher {
    pub fn new(config: BrowserConfig) -> Self {
        let filter = Arc::new(ResourceFilter::blocking(
            config.blocked_resources.iter().copied(),
        ));
        Self { config, filter }
    }

    fn chrome_config(&self, fingerprint: &Fingerprint) -> Result<ChromeConfig> {
        let mut builder = ChromeConfig::builder()
            .no_sandbox()
            .window_size(fingerprint.viewport_width, fingerprint.viewport_height);

        if !self.config.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.config.chrome_executable {
            builder = builder.chrome_executable(path);
        }

        builder.build().map_err(FetchError::Scrape)
    }
}

#[async_trait::async_trait]
impl DriverLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn PageDriver>> {
        let fingerprint = Fingerprint::from_config(&self.config);
        let chrome_config = self.chrome_config(&fingerprint)?;

        let (browser, mut handler) = Browser::launch(chrome_config).await?;

        // The CDP connection only makes progress while its handler is polled
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::trace!("browser handler event error: {}", e);
                }
            }
        });

        // From here on the session owns the process, so every failure path below
        // still runs its teardown.
        let mut session = ChromiumSession {
            browser: Some(browser),
            page: None,
            handler_task: Some(handler_task),
            intercept_task: None,
        };

        if let Err(e) = session.open_page(&fingerprint, self.filter.clone()).await {
            Box::new(session).close().await;
            return Err(e);
        }

        tracing::debug!(user_agent = %fingerprint.user_agent, "browser session launched");
        Ok(Box::new(session))
    }
}

/// How a request paused by `Fetch` interception is resolved.
#[derive(Debug, PartialEq)]
enum PausedCommand {
    /// Abort with `BlockedByClient` so the load signal is never held open
    Fail(FailRequestParams),
    Continue(ContinueRequestParams),
}

fn paused_command(
    filter: &ResourceFilter,
    request_id: RequestId,
    resource_type: &ResourceType,
) -> PausedCommand {
    match filter.decide_cdp(resource_type) {
        Decision::Block => PausedCommand::Fail(FailRequestParams::new(
            request_id,
            ErrorReason::BlockedByClient,
        )),
        Decision::Allow => PausedCommand::Continue(ContinueRequestParams::new(request_id)),
    }
}

/// A running browser plus the single page it drives.
///
/// `close` is the normal teardown; `Drop` aborts the background tasks and
/// lets chromiumoxide kill the child process if the session is dropped early.
pub struct ChromiumSession {
    browser: Option<Browser>,
    page: Option<Page>,
    handler_task: Option<JoinHandle<()>>,
    intercept_task: Option<JoinHandle<()>>,
}

impl ChromiumSession {
    async fn open_page(
        &mut self,
        fingerprint: &Fingerprint,
        filter: Arc<ResourceFilter>,
    ) -> Result<()> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| FetchError::Scrape("browser already closed".to_string()))?;

        let page = browser.new_page("about:blank").await?;
        page.execute(SetUserAgentOverrideParams::new(fingerprint.user_agent.clone()))
            .await?;

        // Subscribe before enabling interception so no paused request is missed
        let mut paused = page.event_listener::<EventRequestPaused>().await?;
        let interceptor = page.clone();
        self.intercept_task = Some(tokio::spawn(async move {
            while let Some(event) = paused.next().await {
                let command =
                    paused_command(&filter, event.request_id.clone(), &event.resource_type);
                let outcome = match command {
                    PausedCommand::Fail(abort) => {
                        tracing::trace!(url = %event.request.url, "blocking sub-resource");
                        interceptor.execute(abort).await.map(|_| ())
                    }
                    PausedCommand::Continue(resume) => {
                        interceptor.execute(resume).await.map(|_| ())
                    }
                };
                if let Err(e) = outcome {
                    tracing::trace!("failed to resolve paused request: {}", e);
                }
            }
        }));

        page.execute(EnableParams {
            patterns: Some(vec![RequestPattern {
                url_pattern: Some("*".to_string()),
                resource_type: None,
                request_stage: Some(RequestStage::Request),
            }]),
            handle_auth_requests: None,
        })
        .await?;

        self.page = Some(page);
        Ok(())
    }

    fn page(&self) -> Result<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| FetchError::Scrape("no page open in session".to_string()))
    }
}

#[async_trait::async_trait]
impl PageDriver for ChromiumSession {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        let page = self.page()?;

        // DOM-ready rather than network idle: pages that poll or stream never go idle
        let mut dom_ready = page.event_listener::<EventDomContentEventFired>().await?;

        let navigation = page.execute(NavigateParams::new(url)).await?;
        if let Some(error_text) = navigation.result.error_text.as_deref() {
            return Err(FetchError::Scrape(format!(
                "navigation to {url} failed: {error_text}"
            )));
        }

        match dom_ready.next().await {
            Some(_) => Ok(()),
            None => Err(FetchError::Scrape(
                "browser connection closed before DOM-ready".to_string(),
            )),
        }
    }

    async fn document(&mut self) -> Result<RenderedDocument> {
        let page = self.page()?;
        let html = page.content().await?;
        let url = page.url().await?.unwrap_or_default();
        Ok(RenderedDocument { url, html })
    }

    async fn close(mut self: Box<Self>) {
        if let Some(task) = self.intercept_task.take() {
            task.abort();
        }
        if let Some(page) = self.page.take() {
            if let Err(e) = page.close().await {
                tracing::debug!("failed to close page: {}", e);
            }
        }
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                tracing::debug!("failed to close browser: {}", e);
            }
            if let Err(e) = browser.wait().await {
                tracing::debug!("failed to reap browser process: {}", e);
            }
        }
        if let Some(task) = self.handler_task.take() {
            task.abort();
        }
        tracing::debug!("browser session closed");
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        if let Some(task) = self.intercept_task.take() {
            task.abort();
        }
        if let Some(task) = self.handler_task.take() {
            task.abort();
        }
        if let Some(browser) = self.browser.take() {
            tracing::warn!("browser session dropped without close, killing process");
            // chromiumoxide kills the child process when the browser is dropped
            drop(browser);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoaudit_core::ResourceKind;

    #[test]
    fn test_heavy_requests_fail_blocked_by_client() {
        let filter = ResourceFilter::default();

        for resource_type in [
            ResourceType::Image,
            ResourceType::Stylesheet,
            ResourceType::Font,
            ResourceType::Media,
        ] {
            let command = paused_command(&filter, RequestId::new("interception-1"), &resource_type);
            assert_eq!(
                command,
                PausedCommand::Fail(FailRequestParams::new(
                    RequestId::new("interception-1"),
                    ErrorReason::BlockedByClient,
                )),
                "{resource_type:?} should be aborted"
            );
        }
    }

    #[test]
    fn test_page_requests_continue() {
        let filter = ResourceFilter::default();

        for resource_type in [
            ResourceType::Document,
            ResourceType::Script,
            ResourceType::Xhr,
            ResourceType::Fetch,
        ] {
            let command = paused_command(&filter, RequestId::new("interception-2"), &resource_type);
            assert_eq!(
                command,
                PausedCommand::Continue(ContinueRequestParams::new(RequestId::new(
                    "interception-2"
                ))),
                "{resource_type:?} should continue"
            );
        }
    }

    #[test]
    fn test_configured_blocklist_drives_commands() {
        let config = BrowserConfig {
            blocked_resources: vec![ResourceKind::Script],
            ..BrowserConfig::default()
        };
        let launcher = ChromiumLauncher::new(config);

        let script = paused_command(&launcher.filter, RequestId::new("s"), &ResourceType::Script);
        let image = paused_command(&launcher.filter, RequestId::new("i"), &ResourceType::Image);

        assert!(matches!(script, PausedCommand::Fail(_)));
        assert!(matches!(image, PausedCommand::Continue(_)));
    }
}
