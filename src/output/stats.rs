//! Run summary reporting
//!
//! This module condenses a finished [`RunState`] into the final
//! user-visible summary: completed/failed counts, per-URL failure
//! reasons, and the artifacts written.

use crate::state::RunState;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

/// Summary of one scrape run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// Number of items that completed with a record
    pub completed: usize,

    /// Number of items that failed, with their reasons
    pub failures: Vec<(String, String)>,

    /// CSV artifacts written
    pub artifacts: Vec<PathBuf>,
}

impl RunSummary {
    /// Builds a summary from a finished run
    pub fn from_run(
        run_state: &RunState,
        started_at: DateTime<Utc>,
        duration: Duration,
        artifacts: Vec<PathBuf>,
    ) -> Self {
        let mut failures: Vec<(String, String)> = run_state
            .failures()
            .map(|(url, reason)| (url.to_string(), reason.to_string()))
            .collect();
        failures.sort();

        Self {
            started_at,
            duration,
            completed: run_state.completed_count(),
            failures,
            artifacts,
        }
    }

    /// Total items that reached a terminal state
    pub fn total(&self) -> usize {
        self.completed + self.failures.len()
    }
}

/// Prints the run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("\n=== Run Summary ===");
    println!(
        "Started: {}",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Duration: {:.1}s", summary.duration.as_secs_f64());
    println!(
        "Items: {} total, {} completed, {} failed",
        summary.total(),
        summary.completed,
        summary.failures.len()
    );

    if !summary.failures.is_empty() {
        println!("\nFailures:");
        for (url, reason) in &summary.failures {
            println!("  - {}: {}", url, reason);
        }
    }

    if summary.artifacts.is_empty() {
        println!("\nNo records extracted; no output written");
    } else {
        println!("\nOutput written:");
        for path in &summary.artifacts {
            println!("  - {}", path.display());
        }
    }
}
