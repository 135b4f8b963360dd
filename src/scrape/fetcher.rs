//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests to fetch page content
//! - Retry logic with exponential backoff for transient failures
//! - Error classification
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | HTTP 2xx | Success |
//! | HTTP 4xx (except 429) | Immediate failure, `HttpClient` |
//! | HTTP 429 | Retry with backoff, then `HttpServer` |
//! | HTTP 5xx | Retry with backoff, then `HttpServer` |
//! | Timeout / connection error | Retry with backoff, then `Network` |
//!
//! Backoff doubles per retry: base, 2x base, 4x base, and so on, up to
//! the configured attempt count.

use crate::config::UserAgentConfig;
use crate::state::FailReason;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Retry behavior for transient fetch failures
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts per URL, counting the first
    pub max_attempts: u32,

    /// Backoff before the first retry; doubles each retry after that
    pub backoff_base: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
        }
    }

    /// Backoff before retry number `retry` (1-based)
    fn backoff_for(&self, retry: u32) -> Duration {
        self.backoff_base * 2u32.saturating_pow(retry.saturating_sub(1))
    }
}

/// Result of a fetch operation, after retries
///
/// The fetcher never raises past its own boundary: every outcome is a
/// `FetchResult` and the caller decides how to react.
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Ok {
        /// HTTP status code
        status: u16,
        /// Page body content
        body: String,
    },

    /// Fetch failed terminally, with retries already spent on transient
    /// failures
    Failed {
        /// The classified failure reason
        reason: FailReason,
        /// How many requests were actually made
        attempts: u32,
    },
}

/// Per-attempt classification, before retry accounting
enum Attempt {
    Ok { status: u16, body: String },
    Transient(FailReason),
    Fatal(FailReason),
}

/// Builds an HTTP client with proper configuration
///
/// The user agent is formatted `Name/Version (+ContactURL; ContactEmail)`
/// so operators of the scraped host can identify and reach us.
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with full error classification and retry logic
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
/// * `policy` - Retry attempt count and backoff base
///
/// # Returns
///
/// A [`FetchResult`] indicating success or the classified failure
pub async fn fetch_url(client: &Client, url: &str, policy: &RetryPolicy) -> FetchResult {
    let mut attempts = 0;
    let mut last_transient = None;

    while attempts < policy.max_attempts {
        attempts += 1;

        match fetch_once(client, url).await {
            Attempt::Ok { status, body } => return FetchResult::Ok { status, body },

            Attempt::Fatal(reason) => {
                return FetchResult::Failed { reason, attempts };
            }

            Attempt::Transient(reason) => {
                tracing::debug!(
                    "Transient failure for {} (attempt {}/{}): {}",
                    url,
                    attempts,
                    policy.max_attempts,
                    reason
                );
                last_transient = Some(reason);

                if attempts < policy.max_attempts {
                    tokio::time::sleep(policy.backoff_for(attempts)).await;
                }
            }
        }
    }

    // Loop only exits here after exhausting retries on transient failures
    let reason = last_transient
        .unwrap_or_else(|| FailReason::Network("retries exhausted".to_string()));
    FetchResult::Failed { reason, attempts }
}

/// Performs a single GET request and classifies the outcome
async fn fetch_once(client: &Client, url: &str) -> Attempt {
    let response = match client.get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            // Timeouts and connection errors are retry-eligible; anything
            // else (invalid URL, request build failure) is not
            return if e.is_timeout() {
                Attempt::Transient(FailReason::Network("request timeout".to_string()))
            } else if e.is_connect() {
                Attempt::Transient(FailReason::Network("connection error".to_string()))
            } else if e.is_builder() || e.is_request() {
                Attempt::Fatal(FailReason::Network(e.to_string()))
            } else {
                Attempt::Transient(FailReason::Network(e.to_string()))
            };
        }
    };

    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        return Attempt::Transient(FailReason::HttpServer(status.as_u16()));
    }

    if status.is_client_error() {
        return Attempt::Fatal(FailReason::HttpClient(status.as_u16()));
    }

    if !status.is_success() {
        // Leftover 1xx/3xx after reqwest's redirect handling
        return Attempt::Fatal(FailReason::HttpClient(status.as_u16()));
    }

    match response.text().await {
        Ok(body) => Attempt::Ok {
            status: status.as_u16(),
            body,
        },
        Err(e) => Attempt::Transient(FailReason::Network(format!("body read failed: {}", e))),
    }
}
