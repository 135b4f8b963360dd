//! Scrape module: fetching, extraction, and run orchestration
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with retry and error classification
//! - Per-kind field extraction via CSS selectors
//! - Randomized inter-request delays
//! - Sequential run orchestration with partial-failure tolerance

mod extractor;
mod fetcher;
mod limiter;
mod pipeline;

pub use extractor::{extract, ExtractError};
pub use fetcher::{build_http_client, fetch_url, FetchResult, RetryPolicy};
pub use limiter::RateLimiter;
pub use pipeline::{CancelFlag, Pipeline};
