//! Search engine profiles
//!
//! Each supported engine carries an immutable bundle of CSS selectors for
//! locating organic results on its result page, plus the query URL it is
//! reached through. The set is closed: config and CLI strings resolve
//! through [`Engine::from_id`], which falls back to Google for anything it
//! does not recognize.

use url::form_urlencoded;

/// Selector bundle and query URL template for one search engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineProfile {
    /// Engine identifier used in config and on the CLI
    pub id: &'static str,

    /// Query URL prefix; the percent-encoded query is appended
    pub query_url: &'static str,

    /// Selector matching one organic result container
    pub result_container: &'static str,

    /// Selector for the result link, scoped to the container
    pub link: &'static str,

    /// Selector for the result title, scoped to the container
    pub title: &'static str,

    /// Selector for the result snippet, scoped to the container
    pub snippet: &'static str,
}

static GOOGLE: EngineProfile = EngineProfile {
    id: "google",
    query_url: "https://www.google.com/search?q=",
    result_container: "div.tF2Cxc",
    link: "a",
    title: "h3",
    snippet: "div.IsZz3e",
};

static BING: EngineProfile = EngineProfile {
    id: "bing",
    query_url: "https://www.bing.com/search?q=",
    result_container: "li.b_algo",
    link: "h2 a",
    title: "h2",
    snippet: "div.b_caption p",
};

static DUCKDUCKGO: EngineProfile = EngineProfile {
    id: "duckduckgo",
    query_url: "https://duckduckgo.com/html/?q=",
    result_container: "div.results_links_deep",
    link: "a.result__a",
    title: "h2",
    snippet: "a.result__snippet",
};

/// Supported search engines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Google,
    Bing,
    DuckDuckGo,
}

impl Engine {
    /// Resolves an engine identifier
    ///
    /// Unknown identifiers fall back to Google with a warning rather than
    /// failing, so a stale config value degrades instead of aborting.
    pub fn from_id(id: &str) -> Self {
        match id.to_ascii_lowercase().as_str() {
            "google" => Engine::Google,
            "bing" => Engine::Bing,
            "duckduckgo" => Engine::DuckDuckGo,
            other => {
                tracing::warn!("Unsupported search engine '{}', using 'google' instead", other);
                Engine::Google
            }
        }
    }

    /// Returns the selector profile for this engine
    pub fn profile(&self) -> &'static EngineProfile {
        match self {
            Engine::Google => &GOOGLE,
            Engine::Bing => &BING,
            Engine::DuckDuckGo => &DUCKDUCKGO,
        }
    }

    /// Builds the search results URL for a query
    pub fn search_url(&self, query: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        format!("{}{}", self.profile().query_url, encoded)
    }
}

impl std::fmt::Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.profile().id)
    }
}
