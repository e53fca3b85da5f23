//! Page content extraction
//!
//! Locates the primary content region of a fetched page, prunes
//! boilerplate subtrees, and produces normalized title, description, and
//! body text. This is a heuristic best-effort extraction, not a reader
//! mode: only paragraph, heading, and list-item text is gathered.

use crate::scrape::normalize_text;
use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node, Selector};

/// Placeholder used when the document has no title element
pub const NO_TITLE: &str = "No title found";

/// Placeholder used when the document has no description meta tag
pub const NO_DESCRIPTION: &str = "No description found";

/// Placeholder used when the document has no content region at all
pub const NO_CONTENT: &str = "No content found in main tags.";

/// Tags whose subtrees are excluded from content text in full
const PRUNED_TAGS: &[&str] = &["header", "footer", "nav", "aside", "script", "style"];

/// Elements whose text is gathered from the content region
const CONTENT_SELECTOR: &str = "p, h1, h2, h3, h4, h5, h6, li";

/// Scraped content of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedPage {
    /// The URL the page was fetched from
    pub url: String,

    /// Normalized document title
    pub title: String,

    /// Normalized description meta content
    pub description: String,

    /// Normalized text of the main content region
    pub full_content: String,
}

/// Extracts title, description, and main content text from a page
///
/// The content region is the first `<main>` element, else the first
/// `<article>`, else the document body. Header, footer, nav, aside,
/// script, and style subtrees inside the region are excluded in full
/// before text is gathered.
pub fn extract_page(html: &str, url: &str) -> ScrapedPage {
    let document = Html::parse_document(html);

    let title = match first_match(&document, "title") {
        Some(element) => normalize_text(&element.text().collect::<String>()),
        None => NO_TITLE.to_string(),
    };

    let description = first_match(&document, "meta[name=\"description\"]")
        .and_then(|element| element.value().attr("content"))
        .map(normalize_text)
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    let region = first_match(&document, "main")
        .or_else(|| first_match(&document, "article"))
        .or_else(|| first_match(&document, "body"));

    let full_content = match region {
        Some(region) => normalize_text(&collect_content_text(region)),
        None => NO_CONTENT.to_string(),
    };

    ScrapedPage {
        url: url.to_string(),
        title,
        description,
        full_content,
    }
}

/// First element matching the selector, if any
fn first_match<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

/// Gathers text from content elements inside the region
///
/// Elements nested under a pruned boilerplate subtree contribute
/// nothing, and pruned subtrees nested inside a content element are
/// excluded from its text as well.
fn collect_content_text(region: ElementRef<'_>) -> String {
    let selector = match Selector::parse(CONTENT_SELECTOR) {
        Ok(selector) => selector,
        Err(_) => return String::new(),
    };

    let mut chunks = Vec::new();
    for element in region.select(&selector) {
        if has_pruned_ancestor(element, region) {
            continue;
        }

        let mut text = String::new();
        push_text(*element, &mut text);
        if !text.trim().is_empty() {
            chunks.push(text);
        }
    }

    chunks.join(" ")
}

/// True when the element sits under a pruned tag within the region
fn has_pruned_ancestor(element: ElementRef<'_>, region: ElementRef<'_>) -> bool {
    for ancestor in element.ancestors() {
        if ancestor.id() == region.id() {
            break;
        }
        if let Some(el) = ElementRef::wrap(ancestor) {
            if PRUNED_TAGS.contains(&el.value().name()) {
                return true;
            }
        }
    }
    false
}

/// Appends the node's descendant text, skipping pruned subtrees
fn push_text(node: NodeRef<'_, Node>, out: &mut String) {
    for child in node.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                if !PRUNED_TAGS.contains(&element.name()) {
                    push_text(child, out);
                }
            }
            _ => {}
        }
    }
}
