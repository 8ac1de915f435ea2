//! geoaudit Core - Foundation crate for the geoaudit page auditor.
//!
//! This crate provides the shared data model, error handling and configuration
//! management that the extractor, report and CLI crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Configuration error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env overrides
//! - [`types`] - The `ScrapedPage` and `AuditRecord` records plus shared enums
//!
//! # Example
//!
//! ```rust
//! use geoaudit_core::{AppConfig, AuditRecord, AuditStatus};
//!
//! let config = AppConfig::default();
//! assert_eq!(config.browser.navigation_timeout_secs, 60);
//!
//! let record = AuditRecord::failed("https://example.com");
//! assert_eq!(record.status, AuditStatus::Error);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, BrowserConfig, LlmConfig, ReportConfig};
pub use error::{ConfigError, ConfigResult};
pub use types::{
    AuditRecord, AuditStatus, Heading, HeadingLevel, Image, Link, ParseStrategy, ResourceKind,
    ScrapedPage,
};
