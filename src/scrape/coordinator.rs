//! Per-query orchestration
//!
//! Ties the pipeline together for one query: fetch the search results
//! page, extract candidates, sample, and fan the page scrapes out
//! through the scheduler. Query failures are contained here - a batch of
//! queries always runs to completion.

use crate::config::Config;
use crate::engine::Engine;
use crate::scrape::fetcher::{FetchError, Fetcher, RetryPolicy};
use crate::scrape::page::ScrapedPage;
use crate::scrape::scheduler::{Scheduler, ScrapeStats};
use crate::scrape::search::{fetch_search_results, SearchResult};
use crate::TrawlError;
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::time::Duration;

/// Outcome of processing one query end to end
#[derive(Debug)]
pub struct QueryReport {
    /// The query that was processed
    pub query: String,

    /// Scraped pages in completion order
    pub pages: Vec<ScrapedPage>,

    /// Batch counters for this query's scrape
    pub stats: ScrapeStats,
}

impl QueryReport {
    fn empty(query: &str) -> Self {
        Self {
            query: query.to_string(),
            pages: Vec::new(),
            stats: ScrapeStats::default(),
        }
    }
}

/// Orchestrates search and scrape for queries under one configuration
pub struct Coordinator {
    engine: Engine,
    num_urls: usize,
    fetcher: Arc<Fetcher>,
    scheduler: Scheduler,
}

impl Coordinator {
    /// Builds a coordinator from a resolved configuration
    pub fn new(config: &Config) -> Result<Self, TrawlError> {
        let policy = RetryPolicy {
            max_attempts: config.scrape.retries,
            base_delay: Duration::from_secs(1),
            timeout: Duration::from_secs(config.scrape.timeout_secs),
        };

        let fetcher = Arc::new(Fetcher::new(policy)?);
        let scheduler = Scheduler::new(
            Arc::clone(&fetcher),
            config.skip_domains(),
            config.scrape.max_workers as usize,
        );

        Ok(Self {
            engine: Engine::from_id(&config.search.engine),
            num_urls: config.scrape.num_urls as usize,
            fetcher,
            scheduler,
        })
    }

    /// The engine this coordinator searches with
    pub fn engine(&self) -> Engine {
        self.engine
    }

    /// Fetches and extracts search results for a query
    ///
    /// `Err` means the search page fetch failed. `Ok` with an empty vec
    /// means the engine produced nothing extractable - the query
    /// completed, it simply yields nothing to scrape.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, FetchError> {
        let url = self.engine.search_url(query);
        fetch_search_results(&self.fetcher, &url, self.engine.profile()).await
    }

    /// Samples up to `num_urls` candidate URLs from the result list
    fn sample_candidates(&self, results: &[SearchResult]) -> Vec<String> {
        let mut rng = rand::thread_rng();
        results
            .choose_multiple(&mut rng, self.num_urls.min(results.len()))
            .map(|result| result.url.clone())
            .collect()
    }

    /// Processes one query end to end: search, sample, scrape
    ///
    /// A failed search yields an empty report with the error logged; it
    /// never aborts a batch of queries.
    pub async fn process_query(&self, query: &str) -> QueryReport {
        tracing::info!("Processing query: '{}'", query);

        let results = match self.search(query).await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!("Search failed for '{}': {}", query, e);
                return QueryReport::empty(query);
            }
        };

        if results.is_empty() {
            tracing::info!("Query '{}' yielded no results to scrape", query);
            return QueryReport::empty(query);
        }

        let candidates = self.sample_candidates(&results);
        let label = query.to_string();
        let outcome = self
            .scheduler
            .scrape_all(candidates, &move |done, total| {
                tracing::info!("Scraping '{}': {}/{}", label, done, total);
            })
            .await;

        QueryReport {
            query: query.to_string(),
            pages: outcome.pages,
            stats: outcome.stats,
        }
    }
}
