//! Turning raw model output into an [`AuditRecord`].
//!
//! Parsing never fails. Text that cannot be understood still yields a
//! record with the default score and a generic set of recommendations.

mod heuristic;
mod json;

pub use heuristic::HeuristicParser;
pub use json::JsonParser;

use geoaudit_core::{AuditRecord, AuditStatus, ParseStrategy};

/// Score used when the text does not state one.
pub const DEFAULT_SCORE: u8 = 75;

/// Recommendations substituted when nothing could be extracted.
pub const FALLBACK_RECOMMENDATIONS: [&str; 3] = [
    "Improve meta descriptions",
    "Add proper heading structure",
    "Optimize images with alt text",
];

/// Converts model output for `url` into an audit record.
pub trait ReportParser: Send + Sync {
    /// Parse `raw`. Implementations must be deterministic.
    fn parse(&self, url: &str, raw: &str) -> AuditRecord;
}

/// The parser matching a prompt flavor.
#[must_use]
pub fn parser_for(strategy: ParseStrategy) -> Box<dyn ReportParser> {
    match strategy {
        ParseStrategy::Heuristic => Box::new(HeuristicParser),
        ParseStrategy::Json => Box::new(JsonParser),
    }
}

/// Assemble the final record, applying the empty-result fallback.
fn finish(
    url: &str,
    seo_score: u8,
    recommendations: Vec<String>,
    technical_issues: Vec<String>,
    content_suggestions: Vec<String>,
) -> AuditRecord {
    let mut record = AuditRecord {
        url: url.to_string(),
        seo_score,
        recommendations,
        technical_issues,
        content_suggestions,
        status: AuditStatus::Success,
    };
    if record.is_empty() {
        tracing::debug!(url = %url, "no findings parsed, using fallback recommendations");
        record.recommendations = FALLBACK_RECOMMENDATIONS.iter().map(|s| (*s).to_string()).collect();
    }
    record
}

/// Clamp a signed score into `0..=100`.
fn clamp_score(value: i64) -> u8 {
    u8::try_from(value.clamp(0, 100)).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_for_strategy() {
        let text = "## Recommendations\n- Add a sitemap";
        for strategy in [ParseStrategy::Heuristic, ParseStrategy::Json] {
            let record = parser_for(strategy).parse("https://example.com", text);
            assert_eq!(record.recommendations, vec!["Add a sitemap".to_string()]);
        }
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(-5), 0);
        assert_eq!(clamp_score(42), 42);
        assert_eq!(clamp_score(150), 100);
        assert_eq!(clamp_score(i64::MAX), 100);
    }
}
