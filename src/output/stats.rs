//! Run summary reporting

use crate::scrape::scheduler::ScrapeStats;
use chrono::{DateTime, Utc};

/// Aggregate counters for one trawl run across all queries
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Queries processed (including ones that yielded nothing)
    pub queries_processed: usize,

    /// Pages scraped successfully
    pub pages_scraped: usize,

    /// Pages that failed fetch or extraction
    pub pages_failed: usize,

    /// URLs excluded by the skip list
    pub pages_skipped: usize,
}

impl RunSummary {
    /// Creates an empty summary stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            queries_processed: 0,
            pages_scraped: 0,
            pages_failed: 0,
            pages_skipped: 0,
        }
    }

    /// Folds one query's batch counters into the run totals
    pub fn record_query(&mut self, stats: &ScrapeStats) {
        self.queries_processed += 1;
        self.pages_scraped += stats.succeeded;
        self.pages_failed += stats.failed;
        self.pages_skipped += stats.skipped;
    }

    /// Success rate across all dispatched pages, as a percentage
    pub fn success_rate(&self) -> f64 {
        let dispatched = self.pages_scraped + self.pages_failed;
        if dispatched == 0 {
            return 0.0;
        }
        (self.pages_scraped as f64 / dispatched as f64) * 100.0
    }

    /// Seconds elapsed since the run started
    pub fn elapsed_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }

    /// Logs the final run summary
    pub fn report(&self) {
        tracing::info!(
            "Summary: {} queries, {} pages scraped, {} failed, {} skipped ({:.0}% success) in {}s",
            self.queries_processed,
            self.pages_scraped,
            self.pages_failed,
            self.pages_skipped,
            self.success_rate(),
            self.elapsed_seconds()
        );
    }
}

impl Default for RunSummary {
    fn default() -> Self {
        Self::new()
    }
}
