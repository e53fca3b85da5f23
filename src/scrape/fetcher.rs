//! HTTP fetcher with retry and backoff
//!
//! This module performs all HTTP requests for the pipeline, including:
//! - Building the shared HTTP client
//! - Per-attempt User-Agent rotation
//! - Transient/terminal failure classification
//! - Exponential backoff between retry attempts
//!
//! Identity selection and backoff sleeping are trait seams so tests can
//! run deterministically without real randomness or delays.

use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::{header::USER_AGENT, redirect::Policy, Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// User-Agent strings rotated across fetch attempts
///
/// Varying the identity per attempt (not per process) reduces trivial
/// bot-blocking on retried requests.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:107.0) Gecko/20100101 Firefox/107.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.1 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Edge/108.0.1462.42 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36",
    "Mozilla/5.0 (iPad; CPU OS 16_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/16.1 Mobile/15E148 Safari/604.1",
];

/// Retry budget and timing shared by search and page fetches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts before giving up (>= 1)
    pub max_attempts: u32,

    /// Base backoff delay; attempt k (0-indexed) waits `base_delay * 2^k`
    pub base_delay: Duration,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            timeout: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Backoff delay after the given 0-indexed attempt
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Errors surfaced by the fetcher
///
/// Transient outcomes (HTTP 500/503, timeouts) never appear here directly;
/// they are retried internally and only show up as `Exhausted` once the
/// attempt budget is spent.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Terminal HTTP status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Terminal transport failure (refused connection, DNS, unreadable body)
    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// Retry budget consumed by transient failures
    #[error("Giving up on {url} after {attempts} attempts")]
    Exhausted { url: String, attempts: u32 },
}

/// Chooses the client identity string for each attempt
pub trait IdentitySource: Send + Sync {
    /// Returns the User-Agent header value for one attempt
    fn identity(&self) -> &str;
}

/// Default identity source: uniform random pick from the browser pool
#[derive(Debug, Default)]
pub struct UserAgentPool;

impl IdentitySource for UserAgentPool {
    fn identity(&self) -> &str {
        let mut rng = rand::thread_rng();
        USER_AGENTS.choose(&mut rng).copied().unwrap_or(USER_AGENTS[0])
    }
}

/// Sleeps between retry attempts
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// Default sleeper backed by the tokio timer
#[derive(Debug, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// How a single failed attempt should be handled
enum Failure {
    /// Retry after backoff
    Transient(String),
    /// Surface immediately without consuming remaining attempts
    Terminal(FetchError),
}

fn classify_status(url: &str, status: StatusCode) -> Failure {
    match status.as_u16() {
        500 | 503 => Failure::Transient(format!("server error {}", status.as_u16())),
        code => Failure::Terminal(FetchError::Status {
            url: url.to_string(),
            status: code,
        }),
    }
}

fn classify_transport(url: &str, error: &reqwest::Error) -> Failure {
    // Connect timeouts report both is_timeout and is_connect; timeouts of
    // either kind are transient, everything else is terminal.
    if error.is_timeout() {
        Failure::Transient("request timeout".to_string())
    } else {
        Failure::Terminal(FetchError::Request {
            url: url.to_string(),
            reason: error.to_string(),
        })
    }
}

/// HTTP fetcher shared by search-page and content-page requests
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
    identities: Arc<dyn IdentitySource>,
    sleeper: Arc<dyn Sleeper>,
}

impl Fetcher {
    /// Creates a fetcher with the default identity pool and tokio sleeper
    pub fn new(policy: RetryPolicy) -> Result<Self, reqwest::Error> {
        Self::with_parts(policy, Arc::new(UserAgentPool), Arc::new(TokioSleeper))
    }

    /// Creates a fetcher with injected identity and sleep strategies
    pub fn with_parts(
        policy: RetryPolicy,
        identities: Arc<dyn IdentitySource>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(policy.timeout)
            .redirect(Policy::limited(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            policy,
            identities,
            sleeper,
        })
    }

    /// The retry policy this fetcher was built with
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetches a URL and returns the response body
    ///
    /// The body is returned as text and parsed by the extraction layer;
    /// response bodies are treated as HTML regardless of the declared
    /// content type.
    ///
    /// # Retry behavior
    ///
    /// | Outcome | Action |
    /// |---------|--------|
    /// | HTTP 2xx | Return body |
    /// | HTTP 500/503 | Retry with backoff |
    /// | Other HTTP error | Fail immediately |
    /// | Timeout (connect or read) | Retry with backoff |
    /// | Connection refused / DNS | Fail immediately |
    /// | Unreadable body | Fail immediately |
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        for attempt in 0..self.policy.max_attempts {
            let identity = self.identities.identity();
            tracing::debug!(
                "Fetching {} (attempt {}/{})",
                url,
                attempt + 1,
                self.policy.max_attempts
            );

            let failure = match self.client.get(url).header(USER_AGENT, identity).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        match response.text().await {
                            Ok(body) => return Ok(body),
                            Err(e) => Failure::Terminal(FetchError::Request {
                                url: url.to_string(),
                                reason: format!("failed to read body: {}", e),
                            }),
                        }
                    } else {
                        classify_status(url, status)
                    }
                }
                Err(e) => classify_transport(url, &e),
            };

            match failure {
                Failure::Terminal(error) => {
                    tracing::warn!("Attempt {} for {} failed: {}", attempt + 1, url, error);
                    return Err(error);
                }
                Failure::Transient(reason) => {
                    tracing::warn!(
                        "Attempt {} for {}: {}, retrying",
                        attempt + 1,
                        url,
                        reason
                    );
                    if attempt + 1 < self.policy.max_attempts {
                        self.sleeper.sleep(self.policy.backoff_delay(attempt)).await;
                    }
                }
            }
        }

        Err(FetchError::Exhausted {
            url: url.to_string(),
            attempts: self.policy.max_attempts,
        })
    }
}
