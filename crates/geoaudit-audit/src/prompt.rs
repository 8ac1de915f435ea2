//! Audit prompt construction.

use geoaudit_core::ParseStrategy;

const PERSONA: &str = "You are an expert auditor for Search Engine Optimization (SEO) and \
Generative Engine Optimization (GEO).\n\n\
Your task is to analyze the provided website and generate a comprehensive audit report.";

const NO_CONTENT: &str =
    "Content: No website content provided - analyze based on URL and general best practices.";

const SECTIONED_FORMAT: &str = "Please provide your analysis in the following structured format:

## SEO Score
Provide a score between 0 and 100 based on the overall SEO quality.

## Recommendations
- List actionable SEO recommendations
- Include keyword optimization suggestions
- Meta descriptions improvements
- Header tag optimization
- Internal linking strategies

## Technical Issues
- Identify technical SEO problems
- Site speed concerns
- Mobile-friendliness issues
- Crawl errors or accessibility problems

## Content Suggestions
- Content quality improvements
- Keyword density optimization
- Readability enhancements
- User engagement improvements";

const JSON_FORMAT: &str = "Respond with a single JSON object and nothing else, using exactly these keys:

{
  \"seo_score\": <integer between 0 and 100 for the overall SEO quality>,
  \"recommendations\": [<actionable SEO recommendations: keywords, meta descriptions, header tags, internal linking>],
  \"technical_issues\": [<technical SEO problems: site speed, mobile-friendliness, crawl errors, accessibility>],
  \"content_suggestions\": [<content quality, keyword density, readability, user engagement>]
}";

const CLOSING: &str =
    "Ensure your analysis is thorough and recommendations are practical and implementable.";

/// Build the audit prompt for `url`.
///
/// `content` is usually the output of [`crate::ContextBuilder::build`]; with
/// `None` the model is told to work from the URL alone. The requested answer
/// layout matches the parser selected by `strategy`.
#[must_use]
pub fn build_audit_prompt(url: &str, content: Option<&str>, strategy: ParseStrategy) -> String {
    let content_section = match content {
        Some(content) if !content.trim().is_empty() => {
            format!("Website Content Analysis:\n{content}...")
        }
        _ => NO_CONTENT.to_string(),
    };

    let format = match strategy {
        ParseStrategy::Heuristic => SECTIONED_FORMAT,
        ParseStrategy::Json => JSON_FORMAT,
    };

    format!("{PERSONA}\n\nWebsite URL: {url}\n{content_section}\n\n{format}\n\n{CLOSING}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_with_content() {
        let prompt = build_audit_prompt(
            "https://example.com",
            Some("Title: Example"),
            ParseStrategy::Heuristic,
        );

        assert!(prompt.contains("Website URL: https://example.com"));
        assert!(prompt.contains("Website Content Analysis:\nTitle: Example..."));
        assert!(!prompt.contains("No website content provided"));
        assert!(prompt.contains("## Technical Issues"));
    }

    #[test]
    fn test_prompt_without_content() {
        for content in [None, Some("  \n")] {
            let prompt = build_audit_prompt("https://example.com", content, ParseStrategy::Heuristic);
            assert!(prompt.contains(NO_CONTENT));
            assert!(!prompt.contains("Website Content Analysis"));
        }
    }

    #[test]
    fn test_json_flavor_names_all_keys() {
        let prompt = build_audit_prompt("https://example.com", None, ParseStrategy::Json);

        for key in ["seo_score", "recommendations", "technical_issues", "content_suggestions"] {
            assert!(prompt.contains(&format!("\"{key}\"")), "missing {key}");
        }
        assert!(!prompt.contains("## SEO Score"));
    }
}
