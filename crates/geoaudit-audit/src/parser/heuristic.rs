//! Line-oriented parsing of free-text audit reports.

use super::{clamp_score, finish, ReportParser, DEFAULT_SCORE};
use geoaudit_core::AuditRecord;

const BULLET_MARKERS: [char; 3] = ['-', '•', '*'];

/// Which list bullets are currently appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Recommendations,
    Technical,
    Content,
}

/// Classification of a single non-blank line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    /// Mentions a score. Carries the parsed value when one was found.
    Score(Option<i64>),
    Header(Section),
    Bullet(&'a str),
    Other,
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        let lower = line.to_lowercase();

        if lower.contains("score") && line.chars().any(|c| c.is_ascii_digit()) {
            return Self::Score(line.split(is_token_boundary).find_map(score_token));
        }
        if lower.contains("recommendation") {
            return Self::Header(Section::Recommendations);
        }
        if lower.contains("technical") {
            return Self::Header(Section::Technical);
        }
        if lower.contains("content") && lower.contains("suggestions") {
            return Self::Header(Section::Content);
        }
        if let Some(rest) = line.strip_prefix(BULLET_MARKERS) {
            return Self::Bullet(rest.trim());
        }
        Self::Other
    }
}

/// Whitespace and the `:`/`=` of a `label:value` pair both separate tokens.
fn is_token_boundary(c: char) -> bool {
    c.is_whitespace() || c == ':' || c == '='
}

/// Reads the first whole number out of a single token.
///
/// Surrounding punctuation is ignored, `85/100` reads as 85 and a leading
/// minus sign is kept. Values too large for `i64` saturate.
fn score_token(token: &str) -> Option<i64> {
    let head = token.split('/').next()?;
    let trimmed = head
        .trim_start_matches(|c: char| c.is_ascii_punctuation() && c != '-')
        .trim_end_matches(|c: char| c.is_ascii_punctuation());

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Parses reports laid out as score, section headers and bullet lists.
///
/// Each trimmed line is, in order of precedence, a score line (mentions
/// "score" and has a digit), a section header, a bullet, or ignored. The
/// last score line with a usable number wins. Bullets before any header
/// are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicParser;

impl ReportParser for HeuristicParser {
    fn parse(&self, url: &str, raw: &str) -> AuditRecord {
        let mut section = Section::None;
        let mut score = None;
        let mut recommendations = Vec::new();
        let mut technical_issues = Vec::new();
        let mut content_suggestions = Vec::new();

        for line in raw.lines().map(str::trim).filter(|l| !l.is_empty()) {
            match Line::classify(line) {
                Line::Score(Some(value)) => score = Some(clamp_score(value)),
                Line::Score(None) | Line::Other => {}
                Line::Header(next) => section = next,
                Line::Bullet("") => {}
                Line::Bullet(item) => {
                    let target = match section {
                        Section::None => continue,
                        Section::Recommendations => &mut recommendations,
                        Section::Technical => &mut technical_issues,
                        Section::Content => &mut content_suggestions,
                    };
                    target.push(item.to_string());
                }
            }
        }

        tracing::debug!(
            url = %url,
            score = ?score,
            recommendations = recommendations.len(),
            technical_issues = technical_issues.len(),
            content_suggestions = content_suggestions.len(),
            "parsed free-text report"
        );

        finish(
            url,
            score.unwrap_or(DEFAULT_SCORE),
            recommendations,
            technical_issues,
            content_suggestions,
        )
    }
}
