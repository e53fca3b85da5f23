//! Search result extraction
//!
//! Parses a search-engine result page with the engine's selector profile
//! and produces the ordered list of organic results.

use crate::engine::EngineProfile;
use crate::scrape::fetcher::{FetchError, Fetcher};
use crate::scrape::normalize_text;
use scraper::{Html, Selector};

/// Placeholder used when a result carries no snippet node
pub const NO_SNIPPET: &str = "No snippet found";

/// One organic search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Result link href as it appears on the page
    pub url: String,

    /// Normalized title text
    pub title: String,

    /// Normalized snippet text, or the snippet placeholder
    pub snippet: String,
}

/// Extracts the ordered organic results from a search result page
///
/// A container contributes a result only when it holds a link with a
/// non-empty href and non-empty title text; containers missing either are
/// silently dropped. Zero matching containers is an empty outcome, not an
/// error - the caller distinguishes "engine returned nothing" from a
/// failed fetch upstream.
pub fn extract_results(html: &str, profile: &EngineProfile) -> Vec<SearchResult> {
    let document = Html::parse_document(html);

    let (container, link, title, snippet) = match (
        Selector::parse(profile.result_container),
        Selector::parse(profile.link),
        Selector::parse(profile.title),
        Selector::parse(profile.snippet),
    ) {
        (Ok(c), Ok(l), Ok(t), Ok(s)) => (c, l, t, s),
        _ => {
            tracing::error!("Invalid selector in profile '{}'", profile.id);
            return Vec::new();
        }
    };

    let mut results = Vec::new();
    for node in document.select(&container) {
        let href = node
            .select(&link)
            .next()
            .and_then(|el| el.value().attr("href"));
        let title_text = node
            .select(&title)
            .next()
            .map(|el| normalize_text(&el.text().collect::<String>()));
        let snippet_text = node
            .select(&snippet)
            .next()
            .map(|el| normalize_text(&el.text().collect::<String>()))
            .unwrap_or_else(|| NO_SNIPPET.to_string());

        match (href, title_text) {
            (Some(href), Some(title_text)) if !href.is_empty() && !title_text.is_empty() => {
                results.push(SearchResult {
                    url: href.to_string(),
                    title: title_text,
                    snippet: snippet_text,
                });
            }
            // A container without both a usable link and a title is dropped
            _ => {}
        }
    }

    results
}

/// Fetches a search results page and extracts its organic results
///
/// `Err` means the result page could not be fetched; `Ok` with an empty
/// vec means the engine produced no extractable results. The two are
/// never conflated.
pub async fn fetch_search_results(
    fetcher: &Fetcher,
    search_url: &str,
    profile: &EngineProfile,
) -> Result<Vec<SearchResult>, FetchError> {
    let body = fetcher.fetch(search_url).await?;
    let results = extract_results(&body, profile);

    if results.is_empty() {
        tracing::info!("No main search results found at {}", search_url);
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;

    fn google_serp(body: &str) -> String {
        format!("<html><body>{}</body></html>", body)
    }

    #[test]
    fn test_extract_full_result() {
        let html = google_serp(
            r#"<div class="tF2Cxc">
                <a href="https://example.com/a">link</a>
                <h3>Example Title</h3>
                <div class="IsZz3e">A snippet.</div>
            </div>"#,
        );

        let results = extract_results(&html, Engine::Google.profile());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://example.com/a");
        assert_eq!(results[0].title, "Example Title");
        assert_eq!(results[0].snippet, "A snippet.");
    }

    #[test]
    fn test_missing_snippet_yields_placeholder() {
        let html = google_serp(
            r#"<div class="tF2Cxc"><a href="/x">l</a><h3>Foo</h3></div>"#,
        );

        let results = extract_results(&html, Engine::Google.profile());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "/x");
        assert_eq!(results[0].title, "Foo");
        assert_eq!(results[0].snippet, NO_SNIPPET);
    }

    #[test]
    fn test_container_without_title_is_dropped() {
        let html = google_serp(
            r#"<div class="tF2Cxc"><a href="https://example.com">l</a></div>"#,
        );

        assert!(extract_results(&html, Engine::Google.profile()).is_empty());
    }

    #[test]
    fn test_container_without_link_is_dropped() {
        let html = google_serp(r#"<div class="tF2Cxc"><h3>Orphan</h3></div>"#);

        assert!(extract_results(&html, Engine::Google.profile()).is_empty());
    }

    #[test]
    fn test_empty_href_is_dropped() {
        let html = google_serp(
            r#"<div class="tF2Cxc"><a href="">l</a><h3>Empty</h3></div>"#,
        );

        assert!(extract_results(&html, Engine::Google.profile()).is_empty());
    }

    #[test]
    fn test_no_containers_is_empty_not_error() {
        let html = google_serp("<p>nothing to see</p>");

        assert!(extract_results(&html, Engine::Google.profile()).is_empty());
    }

    #[test]
    fn test_title_whitespace_is_normalized() {
        let html = google_serp(
            "<div class=\"tF2Cxc\"><a href=\"/y\">l</a><h3>  Two\n  words </h3></div>",
        );

        let results = extract_results(&html, Engine::Google.profile());
        assert_eq!(results[0].title, "Two words");
    }

    #[test]
    fn test_results_keep_document_order() {
        let html = google_serp(
            r#"<div class="tF2Cxc"><a href="/1">l</a><h3>First</h3></div>
               <div class="tF2Cxc"><a href="/2">l</a><h3>Second</h3></div>
               <div class="tF2Cxc"><a href="/3">l</a><h3>Third</h3></div>"#,
        );

        let results = extract_results(&html, Engine::Google.profile());
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_bing_profile_shape() {
        let html = r#"<html><body>
            <li class="b_algo">
                <h2><a href="https://example.com/bing">Bing Title</a></h2>
                <div class="b_caption"><p>Bing snippet</p></div>
            </li>
        </body></html>"#;

        let results = extract_results(html, Engine::Bing.profile());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].url, "https://example.com/bing");
        assert_eq!(results[0].title, "Bing Title");
        assert_eq!(results[0].snippet, "Bing snippet");
    }
}
