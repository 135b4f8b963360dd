//! State module for tracking scrape progress
//!
//! # Components
//!
//! - `ItemState`: tracks the state of individual work items
//!   (pending, fetching, extracting, completed, failed)
//! - `RunState`: the accumulated outcome of a run, owned exclusively by
//!   the pipeline
//! - `FailReason`: why a work item ended in the failed state

mod item_state;
mod run_state;

// Re-export main types
pub use item_state::ItemState;
pub use run_state::{FailReason, RunState};
