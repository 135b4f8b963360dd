use crate::records::PageKind;
use serde::Deserialize;

/// Main configuration structure for Leadsift
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub targets: Vec<TargetEntry>,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Maximum fetch attempts per URL, counting the first
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Per-attempt request timeout (milliseconds)
    #[serde(rename = "request-timeout-ms")]
    pub request_timeout_ms: u64,

    /// Base delay for exponential retry backoff (milliseconds)
    #[serde(rename = "backoff-base-ms")]
    pub backoff_base_ms: u64,

    /// Lower bound of the randomized delay between requests (milliseconds)
    #[serde(rename = "delay-min-ms")]
    pub delay_min_ms: u64,

    /// Upper bound of the randomized delay between requests (milliseconds)
    #[serde(rename = "delay-max-ms")]
    pub delay_max_ms: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the scraper
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the scraper
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the scraper
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for scraper-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Output configuration
///
/// Profiles and companies have different schemas, so each kind gets its
/// own CSV destination.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the profiles CSV file
    #[serde(rename = "profiles-path")]
    pub profiles_path: String,

    /// Path to the companies CSV file
    #[serde(rename = "companies-path")]
    pub companies_path: String,
}

/// One scrape target: a URL plus its expected page kind
#[derive(Debug, Clone, Deserialize)]
pub struct TargetEntry {
    /// The URL to fetch
    pub url: String,

    /// The page schema expected at that URL ("profile" or "company")
    pub kind: PageKind,
}
