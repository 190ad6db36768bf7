//! HTML parser for extracting a page's title and links
//!
//! Links come from `<a href>` tags only. Each href is resolved against the
//! page's own address and normalized, so callers receive ready-to-queue
//! [`Address`] values.

use crate::url::{normalize_address, Address};
use scraper::{Html, Selector};
use url::Url;

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Text of the first `<title>`, trimmed; empty if absent
    pub title: String,

    /// All followable links, in document order
    pub links: Vec<Address>,
}

/// Parses HTML content and extracts the title and links
///
/// # Link Extraction Rules
///
/// **Include:** `<a href="...">` anywhere in the document.
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only hrefs (same page anchors)
/// - Anything that does not resolve to an HTTP(S) URL with a host
///
/// # Example
///
/// ```
/// use sitewalk::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, "Test");
/// assert_eq!(parsed.links[0].as_str(), "https://example.com/page");
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document).unwrap_or_default(),
        links: extract_links(&document, base_url),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
}

/// Extracts all valid links from the HTML document
fn extract_links(document: &Html, base_url: &Url) -> Vec<Address> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves a link href to a normalized address
///
/// Returns None if the link should be excluded.
fn resolve_link(href: &str, base_url: &Url) -> Option<Address> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    // Skip special schemes
    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute = base_url.join(href).ok()?;
    match normalize_address(absolute.as_str()) {
        Ok(address) => Some(address),
        Err(e) => {
            tracing::trace!("Skipping link {}: {}", href, e);
            None
        }
    }
}
