//! Run state accumulated over a scrape run
//!
//! `RunState` is owned exclusively by the pipeline, mutated only through
//! its recording methods, and handed back to the caller when the run
//! ends. It replaces a shared mutable results list with a value.

use crate::records::Record;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use url::Url;

/// Why a work item ended in the failed state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailReason {
    /// Transient network failure (timeout, connection error) that
    /// survived every retry attempt
    #[error("network error: {0}")]
    Network(String),

    /// HTTP 5xx or 429 that survived every retry attempt
    #[error("server error: HTTP {0}")]
    HttpServer(u16),

    /// Non-retryable HTTP 4xx
    #[error("client error: HTTP {0}")]
    HttpClient(u16),

    /// Body could not be parsed as a document at all
    #[error("parse error: {0}")]
    Parse(String),
}

impl FailReason {
    /// Returns true if this reason was retry-eligible before retries
    /// were exhausted
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::HttpServer(_))
    }
}

/// The accumulated outcome of one scrape run
///
/// Invariant: every processed work item lands in exactly one of
/// `completed` or `failed`, and the two URL sets are disjoint. Records
/// are appended in completion order, which equals input order under
/// sequential processing.
#[derive(Debug, Default)]
pub struct RunState {
    completed: HashSet<Url>,
    failed: HashMap<Url, FailReason>,
    records: Vec<Record>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a completed item and its extracted record
    ///
    /// A URL previously recorded as failed stays failed; the accounting
    /// invariant takes precedence over a late success, and the pipeline
    /// never produces both outcomes for one item anyway.
    pub fn record_success(&mut self, url: Url, record: Record) {
        debug_assert!(!self.failed.contains_key(&url));
        if self.completed.insert(url) {
            self.records.push(record);
        }
    }

    /// Records a failed item with the reason it failed
    pub fn record_failure(&mut self, url: Url, reason: FailReason) {
        debug_assert!(!self.completed.contains(&url));
        self.failed.insert(url, reason);
    }

    /// Returns true if the URL completed with a record
    pub fn is_completed(&self, url: &Url) -> bool {
        self.completed.contains(url)
    }

    /// Returns the failure reason for a URL, if it failed
    pub fn failure_reason(&self, url: &Url) -> Option<&FailReason> {
        self.failed.get(url)
    }

    /// The records extracted so far, in completion order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterates over failed URLs and their reasons
    pub fn failures(&self) -> impl Iterator<Item = (&Url, &FailReason)> {
        self.failed.iter()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Total items that reached a terminal state
    pub fn total(&self) -> usize {
        self.completed.len() + self.failed.len()
    }
}
