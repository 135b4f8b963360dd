//! CSV sink for extracted records
//!
//! One artifact per page kind: the header row is derived from the first
//! record's declared schema, so a flush of zero records is ambiguous and
//! rejected before any destination write, and all records of one flush
//! must share a kind. The destination is created or truncated, making a
//! flush of identical records idempotent.

use crate::config::OutputConfig;
use crate::records::{PageKind, Record};
use crate::state::RunState;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while flushing records
#[derive(Debug, Error)]
pub enum SinkError {
    /// Flushing zero records: no schema to derive a header from
    #[error("refusing to flush an empty record set")]
    EmptyRecordSet,

    /// Records of different kinds in one flush
    #[error("records of mixed kinds in one flush ({0} and {1})")]
    MixedKinds(PageKind, PageKind),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Flushes records to a CSV file at `destination`
///
/// Writes a header row naming each field, then one row per record in
/// the order given, with standard CSV quoting for embedded delimiters.
///
/// # Errors
///
/// * [`SinkError::EmptyRecordSet`] - `records` is empty; nothing is written
/// * [`SinkError::MixedKinds`] - records disagree on their schema
/// * [`SinkError::Io`] / [`SinkError::Csv`] - the destination is unwritable
pub fn flush_records(records: &[Record], destination: &Path) -> Result<(), SinkError> {
    let first = records.first().ok_or(SinkError::EmptyRecordSet)?;
    let kind = first.kind();

    if let Some(other) = records.iter().find(|r| r.kind() != kind) {
        return Err(SinkError::MixedKinds(kind, other.kind()));
    }

    let mut writer = csv::Writer::from_path(destination)?;
    writer.write_record(first.field_names())?;
    for record in records {
        writer.write_record(record.field_values())?;
    }
    writer.flush()?;

    tracing::info!(
        "Flushed {} {} record(s) to {}",
        records.len(),
        kind,
        destination.display()
    );

    Ok(())
}

/// Writes a run's records to their kind-specific destinations
///
/// Records are partitioned by kind with their relative order preserved.
/// A kind that produced no records is skipped rather than flushed: the
/// empty-set precondition guards explicit flushes, but a profiles-only
/// run must not fail over an empty companies batch.
///
/// # Returns
///
/// The paths actually written, in (profiles, companies) order.
pub fn write_outputs(run_state: &RunState, config: &OutputConfig) -> Result<Vec<PathBuf>, SinkError> {
    let mut written = Vec::new();

    for (kind, path) in [
        (PageKind::Profile, Path::new(&config.profiles_path)),
        (PageKind::Company, Path::new(&config.companies_path)),
    ] {
        let batch: Vec<Record> = run_state
            .records()
            .iter()
            .filter(|r| r.kind() == kind)
            .cloned()
            .collect();

        if batch.is_empty() {
            tracing::debug!("No {} records to flush, skipping {}", kind, path.display());
            continue;
        }

        flush_records(&batch, path)?;
        written.push(path.to_path_buf());
    }

    Ok(written)
}
