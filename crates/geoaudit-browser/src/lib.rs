//! Headless page extraction for geoaudit.
//!
//! Drives Chromium under a sub-resource filter, waits for DOM-ready and
//! distills the rendered page into a `ScrapedPage`.

pub mod distill;
pub mod driver;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod fingerprint;

pub use distill::distill;
pub use driver::{DriverLauncher, PageDriver, RenderedDocument};
pub use engine::{ChromiumLauncher, ChromiumSession};
pub use error::{FetchError, Result};
pub use extractor::{ContentExtractor, DEFAULT_NAVIGATION_TIMEOUT};
pub use filter::{Decision, ResourceFilter};
pub use fingerprint::Fingerprint;
