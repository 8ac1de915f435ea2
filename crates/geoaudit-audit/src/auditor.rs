//! End-to-end audit of a single URL.
//!
//! The [`Auditor`] owns no global state: the extractor and provider are
//! injected, so one auditor can serve concurrent audits and tests can swap
//! either side for a fake.

use crate::context::ContextBuilder;
use crate::error::Result;
use crate::parser::parser_for;
use crate::prompt::build_audit_prompt;
use geoaudit_browser::ContentExtractor;
use geoaudit_core::{AuditRecord, LlmConfig, ParseStrategy};
use geoaudit_llm::{CompletionRequest, LlmProvider};
use std::sync::Arc;
use std::time::Instant;

const DEFAULT_MAX_TOKENS: u32 = 1000;
const DEFAULT_TEMPERATURE: f32 = 0.1;

/// A single audit job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRequest {
    /// Page to audit
    pub url: String,
    /// Pre-extracted content. When set, the page is not rendered.
    pub content: Option<String>,
    /// Whether to render the page when no content was supplied
    pub scrape: bool,
}

impl AuditRequest {
    /// Audit `url`, rendering it to obtain content.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: None,
            scrape: true,
        }
    }

    /// Use `content` instead of rendering the page.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Skip rendering; the model works from the URL alone unless content
    /// was supplied.
    #[must_use]
    pub fn without_scrape(mut self) -> Self {
        self.scrape = false;
        self
    }
}

/// Runs extraction, prompting, generation and parsing for one URL.
#[derive(Clone)]
pub struct Auditor {
    extractor: ContentExtractor,
    provider: Arc<dyn LlmProvider>,
    strategy: ParseStrategy,
    max_tokens: u32,
    temperature: f32,
}

impl Auditor {
    /// Create an auditor with the heuristic strategy and default generation
    /// settings.
    #[must_use]
    pub fn new(extractor: ContentExtractor, provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            extractor,
            provider,
            strategy: ParseStrategy::default(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Select the prompt flavor and matching parser.
    #[must_use]
    pub fn with_strategy(mut self, strategy: ParseStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Take generation settings from configuration.
    #[must_use]
    pub fn with_llm_config(mut self, config: &LlmConfig) -> Self {
        self.max_tokens = config.max_tokens;
        self.temperature = config.temperature;
        self
    }

    /// The configured parse strategy.
    #[must_use]
    pub fn strategy(&self) -> ParseStrategy {
        self.strategy
    }

    /// Audit one page.
    ///
    /// Extraction and generation failures are returned as errors. Parsing
    /// itself never fails.
    pub async fn audit(&self, request: &AuditRequest) -> Result<AuditRecord> {
        let started = Instant::now();
        let url = request.url.as_str();

        let content = match (&request.content, request.scrape) {
            (Some(content), _) => {
                tracing::debug!(url = %url, chars = content.len(), "using supplied content");
                Some(content.clone())
            }
            (None, true) => {
                let page = self.extractor.extract(url).await?;
                Some(ContextBuilder::build(&page))
            }
            (None, false) => {
                tracing::debug!(url = %url, "scraping disabled, auditing from URL only");
                None
            }
        };

        let prompt = build_audit_prompt(url, content.as_deref(), self.strategy);
        let completion = CompletionRequest::new(prompt)
            .with_max_tokens(self.output_budget())
            .with_temperature(self.temperature);

        tracing::info!(
            url = %url,
            provider = self.provider.provider_id(),
            strategy = %self.strategy,
            "requesting audit report"
        );
        let response = self.provider.complete(completion).await?;
        if response.truncated() {
            tracing::warn!(url = %url, "report hit the output token limit and may be incomplete");
        }

        let record = parser_for(self.strategy).parse(url, &response.content);
        tracing::info!(
            url = %url,
            seo_score = record.seo_score,
            recommendations = record.recommendations.len(),
            technical_issues = record.technical_issues.len(),
            content_suggestions = record.content_suggestions.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "audit complete"
        );

        Ok(record)
    }

    /// Configured `max_tokens`, capped at what the model accepts.
    fn output_budget(&self) -> u32 {
        let limit = self.provider.capabilities().max_output_tokens;
        if self.max_tokens > limit {
            tracing::debug!(
                requested = self.max_tokens,
                limit,
                "capping max_tokens at the model limit"
            );
            limit
        } else {
            self.max_tokens
        }
    }
}
