//! geoaudit LLM - provider abstraction for report generation.
//!
//! The audit pipeline treats the model as opaque: a prompt goes in, untyped
//! text comes out. [`LlmProvider`] is that seam; [`AnthropicProvider`] is the
//! production implementation. Callers build one provider and share it.
//!
//! # Example
//!
//! ```rust,no_run
//! use geoaudit_llm::{AnthropicProvider, CompletionRequest, LlmProvider};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = AnthropicProvider::new("sk-ant-...")?;
//!
//! let request = CompletionRequest::new("Audit https://example.com for SEO")
//!     .with_max_tokens(1000)
//!     .with_temperature(0.1);
//! let response = provider.complete(request).await?;
//!
//! println!("Report: {}", response.content);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod provider;
pub mod providers;

pub use error::{LlmError, Result};
pub use provider::{
    CompletionRequest, CompletionResponse, LlmProvider, Message, ProviderCapabilities, Role, Usage,
};
pub use providers::AnthropicProvider;
