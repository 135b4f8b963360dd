//! Leadsift: a polite structured-page scraper
//!
//! This crate fetches an ordered worklist of profile and company pages,
//! extracts a fixed set of text fields per page kind via CSS selectors,
//! and flushes the collected records to kind-specific CSV files. One URL
//! is in flight at a time, with a randomized delay between requests.

pub mod config;
pub mod output;
pub mod records;
pub mod scrape;
pub mod state;

use thiserror::Error;

/// Main error type for Leadsift operations
///
/// Per-item fetch and extraction failures are NOT represented here: the
/// pipeline downgrades those to a [`state::FailReason`] recorded against
/// the item, and the run continues. `ScrapeError` covers the failures
/// that abort the run as a whole.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Sink(#[from] output::SinkError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Leadsift operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use records::{PageKind, Record, WorkItem, SENTINEL};
pub use state::{FailReason, ItemState, RunState};
