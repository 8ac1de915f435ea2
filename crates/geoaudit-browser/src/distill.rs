//! Turns rendered markup into a [`ScrapedPage`].
//!
//! Mirrors what the DOM reports for the same nodes: `textContent` trimmed,
//! `href`/`src` resolved against the document base URL, and the title
//! whitespace-collapsed like `document.title`.

use geoaudit_core::{Heading, HeadingLevel, Image, Link, ScrapedPage};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("valid title selector"));
static BASE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("base[href]").expect("valid base selector"));
static HEADINGS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3").expect("valid heading selector"));
static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid anchor selector"));
static IMAGES: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("valid image selector"));
static PARAGRAPHS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("valid paragraph selector"));

/// Distill `html`, rendered at `page_url`, into a [`ScrapedPage`].
pub fn distill(html: &str, page_url: &str) -> ScrapedPage {
    let document = Html::parse_document(html);
    let base = document_base(&document, page_url);

    let title = document
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();

    let headings = document
        .select(&HEADINGS)
        .filter_map(|el| {
            HeadingLevel::from_tag(el.value().name()).map(|tag| Heading {
                tag,
                text: text_content(&el),
            })
        })
        .collect();

    let links = document
        .select(&ANCHORS)
        .filter_map(|el| {
            let href = resolve(base.as_ref(), el.value().attr("href")?)?;
            if href.is_empty() {
                return None;
            }
            Some(Link {
                text: text_content(&el),
                href,
            })
        })
        .collect();

    let images = document
        .select(&IMAGES)
        .map(|el| Image {
            alt: el.value().attr("alt").unwrap_or_default().trim().to_string(),
            src: el
                .value()
                .attr("src")
                .and_then(|src| resolve(base.as_ref(), src))
                .unwrap_or_default(),
        })
        .collect();

    let paragraphs = document
        .select(&PARAGRAPHS)
        .map(|el| text_content(&el))
        .filter(|text| !text.is_empty())
        .collect();

    ScrapedPage {
        html: html.to_string(),
        title,
        headings,
        links,
        images,
        paragraphs,
    }
}

fn text_content(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// `<base href>` resolved against the page URL, else the page URL itself.
fn document_base(document: &Html, page_url: &str) -> Option<Url> {
    let page = Url::parse(page_url).ok();
    let declared = document
        .select(&BASE)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(str::trim);

    match (declared, &page) {
        (Some(href), Some(page)) => page.join(href).ok().or_else(|| Some(page.clone())),
        (Some(href), None) => Url::parse(href).ok(),
        (None, _) => page,
    }
}

/// Resolve an attribute value the way the DOM's reflected URL properties do.
/// Returns `None` when the value cannot be turned into a URL.
fn resolve(base: Option<&Url>, raw: &str) -> Option<String> {
    let raw = raw.trim();
    match base {
        Some(base) => base.join(raw).ok().map(String::from),
        None => Url::parse(raw).ok().map(String::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html>
          <head><title>
            Acme   Widgets
          </title></head>
          <body>
            <h1> Widgets </h1>
            <p>  First paragraph.  </p>
            <h2>Pricing</h2>
            <p>   </p>
            <a href="/pricing"> See pricing </a>
            <a>No target</a>
            <a href="https://other.example/docs">Docs</a>
            <h3>FAQ</h3>
            <h4>Ignored</h4>
            <img src="/logo.png" alt=" Acme logo ">
            <img src="hero.jpg">
            <p>Second <b>paragraph</b>.</p>
          </body>
        </html>
    "#;

    #[test]
    fn test_title_is_collapsed() {
        let page = distill(PAGE, "https://acme.example/products/");
        assert_eq!(page.title, "Acme Widgets");
    }

    #[test]
    fn test_headings_in_document_order() {
        let page = distill(PAGE, "https://acme.example/products/");
        let headings: Vec<(HeadingLevel, &str)> =
            page.headings.iter().map(|h| (h.tag, h.text.as_str())).collect();

        assert_eq!(
            headings,
            vec![
                (HeadingLevel::H1, "Widgets"),
                (HeadingLevel::H2, "Pricing"),
                (HeadingLevel::H3, "FAQ"),
            ]
        );
    }

    #[test]
    fn test_links_resolved_and_filtered() {
        let page = distill(PAGE, "https://acme.example/products/");

        assert_eq!(page.links.len(), 2);
        assert_eq!(page.links[0].text, "See pricing");
        assert_eq!(page.links[0].href, "https://acme.example/pricing");
        assert_eq!(page.links[1].href, "https://other.example/docs");
        assert!(page.links.iter().all(|l| !l.href.is_empty()));
    }

    #[test]
    fn test_images_keep_alt_and_resolved_src() {
        let page = distill(PAGE, "https://acme.example/products/");

        assert_eq!(page.images.len(), 2);
        assert_eq!(page.images[0].alt, "Acme logo");
        assert_eq!(page.images[0].src, "https://acme.example/logo.png");
        assert_eq!(page.images[1].alt, "");
        assert_eq!(page.images[1].src, "https://acme.example/products/hero.jpg");
    }

    #[test]
    fn test_paragraphs_trimmed_and_non_empty() {
        let page = distill(PAGE, "https://acme.example/products/");
        assert_eq!(page.paragraphs, vec!["First paragraph.", "Second paragraph."]);
    }

    #[test]
    fn test_html_is_kept_verbatim() {
        let page = distill(PAGE, "https://acme.example/products/");
        assert_eq!(page.html, PAGE);
    }

    #[test]
    fn test_base_element_changes_resolution() {
        let html = r#"<html><head><base href="https://cdn.example/assets/"></head>
            <body><a href="guide.html">Guide</a></body></html>"#;
        let page = distill(html, "https://acme.example/");
        assert_eq!(page.links[0].href, "https://cdn.example/assets/guide.html");
    }

    #[test]
    fn test_relative_links_dropped_without_base() {
        let html = r#"<a href="/relative">Relative</a><a href="https://abs.example/">Absolute</a>"#;
        let page = distill(html, "not a url");
        assert_eq!(page.links.len(), 1);
        assert_eq!(page.links[0].href, "https://abs.example/");
    }

    #[test]
    fn test_empty_document() {
        let page = distill("", "https://acme.example/");
        assert!(page.title.is_empty());
        assert!(page.headings.is_empty());
        assert!(page.links.is_empty());
        assert!(page.images.is_empty());
        assert!(page.paragraphs.is_empty());
    }
}
