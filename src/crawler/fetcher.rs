//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent
//! - GET requests to fetch page content
//! - Error classification into timeout / protocol / status failures
//! - Delegating retries to a [`RetryPolicy`]

use crate::config::FetchConfig;
use crate::crawler::retry::RetryPolicy;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Maximum number of redirects followed for a single request
const MAX_REDIRECTS: usize = 10;

/// Why a fetch failed
#[derive(Debug, Error)]
pub enum FetchError {
    /// An attempt did not complete within its timeout
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// Connection, DNS, TLS, redirect or body transfer failure
    #[error("request to {url} failed: {reason}")]
    Protocol { url: String, reason: String },

    /// The server answered with a non-success status code
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The address cannot be requested at all
    #[error("invalid address {url}: {reason}")]
    InvalidAddress { url: String, reason: String },

    /// Every allowed attempt failed with a retryable error
    #[error("giving up on {url} after {attempts} attempts: {last}")]
    Exhausted {
        url: String,
        attempts: u32,
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Returns true for failures that may succeed on another attempt
    ///
    /// | Failure | Transient |
    /// |---------|-----------|
    /// | Timeout | yes |
    /// | Connection / protocol error | yes |
    /// | HTTP 5xx, 408, 429 | yes |
    /// | Other HTTP 4xx | no |
    /// | Invalid address | no |
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Protocol { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 408 || *status == 429,
            Self::InvalidAddress { .. } | Self::Exhausted { .. } => false,
        }
    }

    /// The address the failure refers to
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url, .. }
            | Self::Protocol { url, .. }
            | Self::Status { url, .. }
            | Self::InvalidAddress { url, .. }
            | Self::Exhausted { url, .. } => url,
        }
    }
}

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects; relative links resolve against this
    pub final_url: Url,
    /// HTTP status code
    pub status_code: u16,
    /// Page body content
    pub body: String,
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use campus_search::config::FetchConfig;
/// use campus_search::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_millis(config.timeout_ms);

    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs GET requests under a retry policy
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    policy: RetryPolicy,
}

impl Fetcher {
    /// Creates a fetcher from the `[fetch]` configuration section
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            policy: RetryPolicy::from_config(config),
        })
    }

    /// Creates a fetcher from an existing client and policy
    pub fn with_policy(client: Client, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetches an address, retrying transient failures
    ///
    /// # Returns
    ///
    /// * `Ok(FetchedPage)` - The page body and the final URL after redirects
    /// * `Err(FetchError::InvalidAddress)` - The address could not be parsed (not retried)
    /// * `Err(FetchError::Exhausted)` - Every attempt failed with a transient error
    /// * `Err(FetchError::Status)` - A non-retryable HTTP status was returned
    pub async fn fetch(&self, address: &str) -> Result<FetchedPage, FetchError> {
        let url = Url::parse(address).map_err(|e| FetchError::InvalidAddress {
            url: address.to_string(),
            reason: e.to_string(),
        })?;

        self.policy
            .run(address, |_| self.attempt(url.clone()))
            .await
    }

    /// A single GET without retries
    async fn attempt(&self, url: Url) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| classify_error(&url, e, self.policy.per_attempt_timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| classify_error(&url, e, self.policy.per_attempt_timeout))?;

        Ok(FetchedPage {
            final_url,
            status_code: status.as_u16(),
            body,
        })
    }
}

/// Maps a reqwest error onto the fetch failure classes
fn classify_error(url: &Url, error: reqwest::Error, timeout: Duration) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else if error.is_builder() {
        FetchError::InvalidAddress {
            url: url.to_string(),
            reason: error.to_string(),
        }
    } else {
        FetchError::Protocol {
            url: url.to_string(),
            reason: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&FetchConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_transient_classification() {
        let url = "https://www.utk.edu/".to_string();
        let timeout = FetchError::Timeout {
            url: url.clone(),
            timeout: Duration::from_secs(10),
        };
        let protocol = FetchError::Protocol {
            url: url.clone(),
            reason: "dns error".to_string(),
        };
        let server = FetchError::Status {
            url: url.clone(),
            status: 503,
        };
        let throttled = FetchError::Status {
            url: url.clone(),
            status: 429,
        };
        let missing = FetchError::Status {
            url: url.clone(),
            status: 404,
        };
        let invalid = FetchError::InvalidAddress {
            url: url.clone(),
            reason: "relative URL without a base".to_string(),
        };

        assert!(timeout.is_transient());
        assert!(protocol.is_transient());
        assert!(server.is_transient());
        assert!(throttled.is_transient());
        assert!(!missing.is_transient());
        assert!(!invalid.is_transient());

        let exhausted = FetchError::Exhausted {
            url,
            attempts: 10,
            last: Box::new(timeout),
        };
        assert!(!exhausted.is_transient());
        assert_eq!(exhausted.url(), "https://www.utk.edu/");
    }

    #[tokio::test]
    async fn test_malformed_address_is_not_retried() {
        let fetcher = Fetcher::new(&FetchConfig::default()).unwrap();
        let result = fetcher.fetch("not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidAddress { .. })));
    }

    // Network behaviour (retries, timeouts, redirects) is covered with
    // wiremock in tests/crawl_tests.rs
}
