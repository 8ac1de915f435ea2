//! Parsing of reports requested as a JSON object.

use super::{clamp_score, finish, HeuristicParser, ReportParser, DEFAULT_SCORE};
use geoaudit_core::AuditRecord;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawReport {
    seo_score: Option<Value>,
    recommendations: Option<Vec<Value>>,
    technical_issues: Option<Vec<Value>>,
    content_suggestions: Option<Vec<Value>>,
}

/// Parses a JSON report, tolerating code fences and surrounding prose.
///
/// When no JSON object can be decoded the text is handed to
/// [`HeuristicParser`], so a model that ignored the requested format still
/// produces a usable record.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl ReportParser for JsonParser {
    fn parse(&self, url: &str, raw: &str) -> AuditRecord {
        let decoded = object_slice(raw).and_then(|s| serde_json::from_str::<RawReport>(s).ok());
        let Some(report) = decoded else {
            tracing::debug!(url = %url, "report is not a JSON object, parsing as free text");
            return HeuristicParser.parse(url, raw);
        };

        let score = report
            .seo_score
            .as_ref()
            .and_then(score_value)
            .unwrap_or(DEFAULT_SCORE);

        finish(
            url,
            score,
            entries(report.recommendations),
            entries(report.technical_issues),
            entries(report.content_suggestions),
        )
    }
}

/// The span from the first `{` to the last `}`. Covers bare objects,
/// fenced blocks and objects embedded in prose.
fn object_slice(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn score_value(value: &Value) -> Option<u8> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches("/100").trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() {
        return None;
    }
    // Saturating float-to-int cast, then clamped.
    #[allow(clippy::cast_possible_truncation)]
    let rounded = number.round() as i64;
    Some(clamp_score(rounded))
}

fn entries(values: Option<Vec<Value>>) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match value {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FALLBACK_RECOMMENDATIONS;

    const URL: &str = "https://example.com";

    fn parse(raw: &str) -> AuditRecord {
        JsonParser.parse(URL, raw)
    }

    #[test]
    fn test_plain_object() {
        let record = parse(
            r#"{"seo_score": 81, "recommendations": ["Add alt text"],
                "technical_issues": ["No sitemap"], "content_suggestions": ["Add FAQ"]}"#,
        );

        assert_eq!(record.seo_score, 81);
        assert_eq!(record.recommendations, vec!["Add alt text"]);
        assert_eq!(record.technical_issues, vec!["No sitemap"]);
        assert_eq!(record.content_suggestions, vec!["Add FAQ"]);
    }

    #[test]
    fn test_fenced_object_with_prose() {
        let raw = "Here is the audit:\n```json\n{\"seo_score\": \"64.6\", \
                   \"recommendations\": [\"  Shorten titles  \", \"\"]}\n```\nThanks!";
        let record = parse(raw);

        assert_eq!(record.seo_score, 65);
        assert_eq!(record.recommendations, vec!["Shorten titles"]);
        assert!(record.technical_issues.is_empty());
    }

    #[test]
    fn test_score_clamped_and_defaulted() {
        assert_eq!(parse(r#"{"seo_score": 140, "recommendations": ["x"]}"#).seo_score, 100);
        assert_eq!(parse(r#"{"seo_score": -3, "recommendations": ["x"]}"#).seo_score, 0);
        assert_eq!(parse(r#"{"seo_score": "85/100", "recommendations": ["x"]}"#).seo_score, 85);
        assert_eq!(
            parse(r#"{"seo_score": "great", "recommendations": ["x"]}"#).seo_score,
            DEFAULT_SCORE
        );
        assert_eq!(parse(r#"{"recommendations": ["x"]}"#).seo_score, DEFAULT_SCORE);
    }

    #[test]
    fn test_empty_object_gets_fallback() {
        let record = parse("{}");
        assert_eq!(record.seo_score, DEFAULT_SCORE);
        assert_eq!(record.recommendations, FALLBACK_RECOMMENDATIONS.to_vec());
    }

    #[test]
    fn test_prose_falls_back_to_heuristic() {
        let raw = "Score: 58\n## Technical Issues\n- Render-blocking scripts";
        let record = parse(raw);

        assert_eq!(record.seo_score, 58);
        assert_eq!(record.technical_issues, vec!["Render-blocking scripts"]);
    }

    #[test]
    fn test_malformed_json_falls_back_to_heuristic() {
        let raw = r#"{"seo_score": 90, "recommendations": ["unterminated}"#;
        assert_eq!(parse(raw), HeuristicParser.parse(URL, raw));
        assert_eq!(parse(raw).seo_score, 90);
    }

    #[test]
    fn test_null_lists_treated_as_empty() {
        let record = parse(r#"{"seo_score": 70, "recommendations": null, "technical_issues": ["Slow"]}"#);
        assert!(record.recommendations.is_empty());
        assert_eq!(record.technical_issues, vec!["Slow"]);
    }

    #[test]
    fn test_non_string_entries_skipped() {
        let record = parse(r#"{"recommendations": ["Keep", null, {"a": 1}, 3]}"#);
        assert_eq!(record.recommendations, vec!["Keep", "3"]);
    }
}
