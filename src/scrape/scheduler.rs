//! Bounded-concurrency scrape scheduling
//!
//! This module fans fetch+extract tasks out over candidate URLs:
//! - Skip-listed domains are excluded before dispatch
//! - A semaphore caps the number of fetches in flight
//! - Results are collected in completion order, not input order
//! - Batch counters track what happened to every candidate
//!
//! Retries live entirely inside the fetcher; a task that fails at either
//! stage contributes nothing and is not re-dispatched here.

use crate::scrape::fetcher::Fetcher;
use crate::scrape::page::{extract_page, ScrapedPage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Counters describing one scrape batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeStats {
    /// URLs dispatched to workers
    pub attempted: usize,

    /// URLs excluded by the skip list before dispatch
    pub skipped: usize,

    /// Pages scraped successfully
    pub succeeded: usize,

    /// URLs that failed at fetch or extraction
    pub failed: usize,

    /// Highest number of fetches in flight at any instant
    pub peak_in_flight: usize,
}

/// Result of one scrape batch: pages in completion order plus counters
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub pages: Vec<ScrapedPage>,
    pub stats: ScrapeStats,
}

/// Progress callback invoked after each completed task as (done, total)
///
/// Called only from the single collection loop, never from worker tasks,
/// so implementations need no internal synchronization for ordering.
pub type ProgressFn<'a> = &'a (dyn Fn(usize, usize) + Send + Sync);

/// Dispatches concurrent fetch+extract tasks with a fixed worker limit
pub struct Scheduler {
    fetcher: Arc<Fetcher>,
    skip_domains: Vec<String>,
    worker_limit: usize,
}

impl Scheduler {
    /// Creates a scheduler
    ///
    /// `worker_limit` is the maximum number of fetch+extract tasks in
    /// flight at once; it is clamped to at least 1.
    pub fn new(fetcher: Arc<Fetcher>, skip_domains: Vec<String>, worker_limit: usize) -> Self {
        Self {
            fetcher,
            skip_domains,
            worker_limit: worker_limit.max(1),
        }
    }

    /// True when the URL's host is on the skip list
    ///
    /// URLs that fail to parse are not skipped; they fall through to the
    /// fetcher, which surfaces the failure as a terminal error.
    fn is_skipped(&self, url: &str) -> bool {
        let host = match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
            Some(host) => host,
            None => return false,
        };

        self.skip_domains
            .iter()
            .any(|domain| host_matches(domain, &host))
    }

    /// Scrapes every non-skipped URL, returning pages in completion order
    ///
    /// Returns only after every dispatched task has completed or failed.
    /// No single URL failure affects the rest of the batch.
    pub async fn scrape_all(&self, urls: Vec<String>, on_progress: ProgressFn<'_>) -> ScrapeOutcome {
        let mut stats = ScrapeStats::default();

        // Skip-listed URLs are excluded before dispatch and are never
        // counted as failures.
        let mut candidates = Vec::new();
        for url in urls {
            if self.is_skipped(&url) {
                tracing::info!("Skipping {} (domain on skip list)", url);
                stats.skipped += 1;
            } else {
                candidates.push(url);
            }
        }

        let total = candidates.len();
        stats.attempted = total;

        let semaphore = Arc::new(Semaphore::new(self.worker_limit));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut tasks = JoinSet::new();
        for url in candidates {
            let fetcher = Arc::clone(&self.fetcher);
            let semaphore = Arc::clone(&semaphore);
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return None,
                };

                let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(current, Ordering::SeqCst);

                let result = scrape_one(&fetcher, &url).await;

                in_flight.fetch_sub(1, Ordering::SeqCst);
                result
            });
        }

        let mut pages = Vec::new();
        let mut completed = 0;
        while let Some(joined) = tasks.join_next().await {
            completed += 1;
            match joined {
                Ok(Some(page)) => {
                    stats.succeeded += 1;
                    pages.push(page);
                }
                Ok(None) => stats.failed += 1,
                Err(e) => {
                    tracing::error!("Scrape task failed to run: {}", e);
                    stats.failed += 1;
                }
            }
            on_progress(completed, total);
        }

        stats.peak_in_flight = peak.load(Ordering::SeqCst);

        tracing::debug!(
            "Batch done: {} scraped, {} failed, {} skipped",
            stats.succeeded,
            stats.failed,
            stats.skipped
        );

        ScrapeOutcome { pages, stats }
    }
}

/// Fetches and extracts a single page
///
/// Failures contribute nothing to the batch; the retry budget was
/// already spent inside the fetcher.
async fn scrape_one(fetcher: &Fetcher, url: &str) -> Option<ScrapedPage> {
    match fetcher.fetch(url).await {
        Ok(body) => Some(extract_page(&body, url)),
        Err(e) => {
            tracing::warn!("Failed to scrape {}: {}", url, e);
            None
        }
    }
}

/// Checks whether a host matches a skip-list entry
///
/// An entry matches its own domain and any subdomain: "example.com"
/// matches "example.com" and "news.example.com" but not
/// "notexample.com".
fn host_matches(entry: &str, host: &str) -> bool {
    host == entry || host.ends_with(&format!(".{}", entry))
}
