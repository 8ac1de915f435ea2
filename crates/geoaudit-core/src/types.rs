//! Shared types used across geoaudit.
//!
//! `ScrapedPage` is what the extractor distills from a rendered page and
//! `AuditRecord` is what a report parser produces from LLM output. Both are
//! created fresh for every audit and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Heading level captured from the page. Only `h1` through `h3` are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// `<h1>`
    H1,
    /// `<h2>`
    H2,
    /// `<h3>`
    H3,
}

impl HeadingLevel {
    /// Map a lowercase element name (`h1`, `h2`, `h3`) to a level.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            _ => None,
        }
    }

    /// Uppercase tag name, as the DOM reports it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::H1 => "H1",
            Self::H2 => "H2",
            Self::H3 => "H3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A heading in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level
    pub tag: HeadingLevel,
    /// Trimmed text content
    pub text: String,
}

/// An anchor with a resolved, non-empty `href`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Trimmed visible text
    pub text: String,
    /// Absolute target URL
    pub href: String,
}

/// An image element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Trimmed alt text, empty when absent
    pub alt: String,
    /// Resolved source URL, empty when absent
    pub src: String,
}

/// Structural distillation of one rendered page.
///
/// All text fields are trimmed and every sequence is in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedPage {
    /// Full rendered markup
    pub html: String,
    /// Page title, may be empty
    pub title: String,
    /// `h1`-`h3` headings
    pub headings: Vec<Heading>,
    /// Anchors; never contains an empty `href`
    pub links: Vec<Link>,
    /// Images
    pub images: Vec<Image>,
    /// Non-empty paragraph texts
    pub paragraphs: Vec<String>,
}

/// Outcome of an audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    /// The report was produced and parsed
    Success,
    /// The pipeline failed before a report could be parsed
    Error,
}

/// Structured audit result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// The audited URL, echoed from the request
    pub url: String,
    /// Overall score, always within `0..=100`
    pub seo_score: u8,
    /// Actionable SEO/GEO recommendations
    pub recommendations: Vec<String>,
    /// Technical problems found on the page
    pub technical_issues: Vec<String>,
    /// Content improvements
    pub content_suggestions: Vec<String>,
    /// Audit status
    pub status: AuditStatus,
}

impl AuditRecord {
    /// Record emitted by a caller when the audit pipeline itself failed.
    #[must_use]
    pub fn failed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            seo_score: 0,
            recommendations: Vec::new(),
            technical_issues: Vec::new(),
            content_suggestions: Vec::new(),
            status: AuditStatus::Error,
        }
    }

    /// Whether the record carries no findings at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
            && self.technical_issues.is_empty()
            && self.content_suggestions.is_empty()
    }
}

/// Classification of a sub-resource requested while a page loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Top-level or frame document
    Document,
    /// CSS
    Stylesheet,
    /// Images of any format
    Image,
    /// Audio and video
    Media,
    /// Web fonts
    Font,
    /// JavaScript
    Script,
    /// Subtitle tracks
    TextTrack,
    /// `XMLHttpRequest`
    Xhr,
    /// `fetch()`
    Fetch,
    /// Server-sent events
    EventSource,
    /// WebSocket upgrade
    WebSocket,
    /// Web app manifest
    Manifest,
    /// Anything the engine does not classify more precisely
    Other,
}

impl ResourceKind {
    /// Types that slow a load down without contributing text or structure.
    pub const HEAVY: [ResourceKind; 4] = [Self::Image, Self::Stylesheet, Self::Font, Self::Media];
}

/// Which report parser (and matching prompt flavor) to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseStrategy {
    /// Line-oriented free-text parsing
    #[default]
    Heuristic,
    /// Strict JSON object, falling back to free text
    Json,
}

impl FromStr for ParseStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heuristic" | "text" => Ok(Self::Heuristic),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown parse strategy '{other}'")),
        }
    }
}

impl fmt::Display for ParseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Heuristic => f.write_str("heuristic"),
            Self::Json => f.write_str("json"),
        }
    }
}
