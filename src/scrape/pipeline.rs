//! Pipeline: sequential run orchestration
//!
//! The pipeline walks the worklist strictly in input order, gating each
//! request through the rate limiter, fetching, extracting, and
//! accumulating outcomes in a [`RunState`] it owns exclusively. Per-item
//! fetch and extraction failures are recorded and the run continues;
//! one bad URL never aborts the run.

use crate::records::WorkItem;
use crate::scrape::extractor::extract;
use crate::scrape::fetcher::{fetch_url, FetchResult, RetryPolicy};
use crate::scrape::limiter::RateLimiter;
use crate::state::{FailReason, ItemState, RunState};
use reqwest::Client;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation signal for a running pipeline
///
/// Checked at each loop iteration boundary: once set, no new work items
/// are started, and already-completed records are preserved in the
/// returned run state.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the run to stop at the next iteration boundary
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Orchestrates the fetch -> extract -> accumulate loop
pub struct Pipeline {
    client: Client,
    limiter: RateLimiter,
    retry: RetryPolicy,
}

impl Pipeline {
    pub fn new(client: Client, limiter: RateLimiter, retry: RetryPolicy) -> Self {
        Self {
            client,
            limiter,
            retry,
        }
    }

    /// Runs the worklist to completion and returns the accumulated state
    pub async fn run(&self, items: &[WorkItem]) -> RunState {
        self.run_with_cancel(items, &CancelFlag::new()).await
    }

    /// Runs the worklist, stopping early if `cancel` is set
    ///
    /// Items are processed strictly in input order, one in flight at a
    /// time, with a rate-limit wait before every item except the first.
    pub async fn run_with_cancel(&self, items: &[WorkItem], cancel: &CancelFlag) -> RunState {
        let mut run_state = RunState::new();
        let started = std::time::Instant::now();

        tracing::info!("Starting run over {} work items", items.len());

        for (index, item) in items.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::warn!(
                    "Run cancelled after {} of {} items; keeping completed records",
                    index,
                    items.len()
                );
                break;
            }

            // Politeness gap between requests, not before the first one
            if index > 0 {
                self.limiter.wait().await;
            }

            tracing::info!("Fetching ({}/{}): {}", index + 1, items.len(), item.url);
            self.process_item(item, &mut run_state).await;
        }

        tracing::info!(
            "Run finished: {} completed, {} failed in {:?}",
            run_state.completed_count(),
            run_state.failed_count(),
            started.elapsed()
        );

        run_state
    }

    /// Drives a single work item to a terminal state
    async fn process_item(&self, item: &WorkItem, run_state: &mut RunState) {
        let mut state = ItemState::Pending;

        state = self.transition(state, ItemState::Fetching);

        let body = match fetch_url(&self.client, item.url.as_str(), &self.retry).await {
            FetchResult::Ok { status, body } => {
                tracing::debug!("Fetched {} (HTTP {}, {} bytes)", item.url, status, body.len());
                body
            }
            FetchResult::Failed { reason, attempts } => {
                self.transition(state, ItemState::Failed);
                tracing::warn!(
                    "Failed {} after {} attempt(s): {}",
                    item.url,
                    attempts,
                    reason
                );
                run_state.record_failure(item.url.clone(), reason);
                return;
            }
        };

        state = self.transition(state, ItemState::Extracting);

        match extract(item.kind, &body) {
            Ok(record) => {
                if record.is_all_sentinel() {
                    // Likely selector/page-structure mismatch; still a
                    // completed item per the sentinel contract
                    tracing::warn!(
                        "All fields came back empty for {} ({}); page structure may have changed",
                        item.url,
                        item.kind
                    );
                }
                self.transition(state, ItemState::Completed);
                tracing::info!("Completed {} ({})", item.url, item.kind);
                run_state.record_success(item.url.clone(), record);
            }
            Err(e) => {
                self.transition(state, ItemState::Failed);
                tracing::warn!("Failed to extract {} ({}): {}", item.url, item.kind, e);
                run_state.record_failure(item.url.clone(), FailReason::Parse(e.to_string()));
            }
        }
    }

    /// Advances an item's state, asserting the transition is legal
    fn transition(&self, from: ItemState, to: ItemState) -> ItemState {
        debug_assert!(from.can_transition_to(to), "illegal {} -> {}", from, to);
        tracing::trace!("Item state: {} -> {}", from, to);
        to
    }
}
