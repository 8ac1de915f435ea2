//! Bounded text rendering of a scraped page for use as model input.

use geoaudit_core::ScrapedPage;
use std::borrow::Cow;

/// Maximum number of headings written to the context.
pub const MAX_HEADINGS: usize = 30;
/// Maximum number of links written to the context.
pub const MAX_LINKS: usize = 10;
/// Maximum number of images written to the context.
pub const MAX_IMAGES: usize = 5;
/// Maximum number of paragraphs written to the context.
pub const MAX_PARAGRAPHS: usize = 5;
/// Maximum number of characters kept from the title or any single entry.
pub const MAX_ENTRY_CHARS: usize = 300;
/// Maximum number of HTML characters written to the context.
pub const MAX_HTML_CHARS: usize = 2000;

/// Appended after a list that had more entries than its cap.
pub const TRUNCATION_MARKER: &str = "...(truncated)";
/// Appended after the HTML prefix and after any shortened entry.
pub const ELLIPSIS: &str = "...";

/// Formats a [`ScrapedPage`] into a plain-text blob with per-field caps.
///
/// Every list is capped by count and every entry by [`MAX_ENTRY_CHARS`], so
/// the output size does not grow with the page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextBuilder;

impl ContextBuilder {
    /// Render `page`. Deterministic: the same page always yields the same text.
    ///
    /// The HTML prefix is always followed by [`ELLIPSIS`], even when the
    /// document is shorter than [`MAX_HTML_CHARS`].
    #[must_use]
    pub fn build(page: &ScrapedPage) -> String {
        let mut out = format!("Title: {}\n", clip(&page.title));

        out.push_str("\nHeadings:\n");
        write_capped(&mut out, &page.headings, MAX_HEADINGS, |heading| {
            format!("{}: {}", heading.tag, clip(&heading.text))
        });

        out.push_str("\nLinks:\n");
        write_capped(&mut out, &page.links, MAX_LINKS, |link| {
            format!("- {} ({})", clip(&link.text), clip(&link.href))
        });

        out.push_str("\nImages:\n");
        write_capped(&mut out, &page.images, MAX_IMAGES, |image| {
            format!("- alt=\"{}\" src={}", clip(&image.alt), clip(&image.src))
        });

        out.push_str("\nParagraphs:\n");
        write_capped(&mut out, &page.paragraphs, MAX_PARAGRAPHS, |p| {
            format!("- {}", clip(p))
        });

        out.push_str("\nHTML:\n");
        out.extend(page.html.chars().take(MAX_HTML_CHARS));
        out.push_str(ELLIPSIS);
        out.push('\n');

        out
    }
}

/// Shorten `text` to [`MAX_ENTRY_CHARS`] characters, marking the cut.
fn clip(text: &str) -> Cow<'_, str> {
    match text.char_indices().nth(MAX_ENTRY_CHARS) {
        Some((end, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &text[..end])),
        None => Cow::Borrowed(text),
    }
}

fn write_capped<T>(out: &mut String, items: &[T], cap: usize, render: impl Fn(&T) -> String) {
    for item in items.iter().take(cap) {
        out.push_str(&render(item));
        out.push('\n');
    }
    if items.len() > cap {
        out.push_str(TRUNCATION_MARKER);
        out.push('\n');
    }
}
