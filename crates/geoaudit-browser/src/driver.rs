use crate::error::Result;

/// Markup captured once a navigation reached DOM-ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Document URL after redirects
    pub url: String,
    /// Serialized DOM
    pub html: String,
}

/// One isolated browsing session driving a single page.
#[async_trait::async_trait]
pub trait PageDriver: Send {
    /// Navigate to a URL, resolving once `DOMContentLoaded` fires.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Read the rendered document.
    async fn document(&mut self) -> Result<RenderedDocument>;

    /// Tear the session down, releasing the page and any owned process.
    async fn close(self: Box<Self>);
}

/// Opens a fresh [`PageDriver`] for every extraction.
#[async_trait::async_trait]
pub trait DriverLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn PageDriver>>;
}
