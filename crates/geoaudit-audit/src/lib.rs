//! geoaudit audit pipeline.
//!
//! Ties page extraction, prompt construction, report generation and report
//! parsing together. The pure pieces ([`ContextBuilder`], the
//! [`ReportParser`] implementations and [`build_audit_prompt`]) can be used
//! on their own, for example to re-parse a saved model response.
//!
//! # Example
//!
//! ```rust,ignore
//! use geoaudit_audit::{AuditRequest, Auditor};
//! use geoaudit_browser::ContentExtractor;
//! use geoaudit_llm::AnthropicProvider;
//! use std::sync::Arc;
//!
//! let extractor = ContentExtractor::chromium(&config.browser);
//! let provider = Arc::new(AnthropicProvider::from_config(&config.llm)?);
//! let auditor = Auditor::new(extractor, provider).with_llm_config(&config.llm);
//!
//! let record = auditor.audit(&AuditRequest::new("https://example.com")).await?;
//! println!("score: {}", record.seo_score);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod auditor;
pub mod context;
pub mod error;
pub mod parser;
pub mod prompt;

pub use auditor::{AuditRequest, Auditor};
pub use context::ContextBuilder;
pub use error::{AuditError, Result};
pub use parser::{
    parser_for, HeuristicParser, JsonParser, ReportParser, DEFAULT_SCORE,
    FALLBACK_RECOMMENDATIONS,
};
pub use prompt::build_audit_prompt;
