//! Output module: CSV flushing and run summaries
//!
//! Unlike per-item fetch failures, a failed flush loses all accumulated
//! work, so sink errors are surfaced to the top-level caller as
//! run-fatal.

mod csv_sink;
mod stats;

pub use csv_sink::{flush_records, write_outputs, SinkError};
pub use stats::{print_summary, RunSummary};
