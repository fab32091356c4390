use std::collections::HashMap;
use std::thread;
use std::time::Duration;

use ureq::Agent;

use crate::error::{AggregateError, Result};

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of attempts per URL (first try plus retries)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Base delay between retries; doubles after each failed attempt
pub const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Default User-Agent header sent with every request
pub const DEFAULT_USER_AGENT: &str = concat!("rule-aggregator-r/", env!("CARGO_PKG_VERSION"));

/// Trait for retrieving raw rule text for a URL
pub trait RuleFetcher: Send + Sync {
    /// Fetch the body of a rule source.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP fetcher with bounded retry and exponential backoff.
///
/// The agent owns the connection pool and is safe for concurrent use;
/// one fetcher is shared by all workers of a group. Transient failures
/// (rate limiting, server errors, timeouts, transport errors) are
/// retried up to the attempt limit; anything else fails immediately.
pub struct HttpFetcher {
    agent: Agent,
    user_agent: String,
    max_attempts: u32,
    backoff: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with default timeout, retries, and User-Agent.
    pub fn new() -> Self {
        Self {
            agent: build_agent(DEFAULT_TIMEOUT),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_RETRY_BACKOFF,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = build_agent(timeout);
        self
    }

    /// Set the User-Agent header sent with every request.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the attempt limit per URL (minimum 1).
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Set the base retry delay.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    fn fetch_once(&self, url: &str) -> std::result::Result<String, ureq::Error> {
        let mut response = self
            .agent
            .get(url)
            .header("User-Agent", self.user_agent.as_str())
            .call()?;
        response.body_mut().read_to_string()
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let mut attempt = 1;
        loop {
            match self.fetch_once(url) {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.max_attempts && is_retryable(&e) => {
                    let delay = self.backoff * (1u32 << (attempt - 1));
                    log::warn!(
                        "fetch {url} attempt {attempt}/{}: {e}; retrying in {delay:?}",
                        self.max_attempts
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(AggregateError::FetchError(format!("{url}: {e}"))),
            }
        }
    }
}

fn build_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}

/// Transient failures worth another attempt
fn is_retryable(err: &ureq::Error) -> bool {
    match err {
        ureq::Error::StatusCode(code) => *code == 429 || *code >= 500,
        ureq::Error::Timeout(_) => true,
        ureq::Error::Io(_) => true,
        ureq::Error::ConnectionFailed => true,
        _ => false,
    }
}

/// In-memory fetcher for testing
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    responses: HashMap<String, String>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the body returned for a URL.
    pub fn add(&mut self, url: impl Into<String>, body: impl Into<String>) {
        self.responses.insert(url.into(), body.into());
    }
}

impl RuleFetcher for MemoryFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| AggregateError::FetchError(format!("{url}: no response registered")))
    }
}
