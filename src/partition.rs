//! Two-pass record partitioning.
//!
//! A source too large to process in one go is split into `K` partition
//! files, each independently processable downstream. Partitioning is pure
//! I/O segmentation: rows pass through untouched, in source order, with the
//! source schema reproduced in every partition.
//!
//! Boundaries require a full count first, so the source is scanned twice:
//! pass one fixes the schema and counts rows, pass two replays the source
//! and writes windows. A source that cannot be reopened for the second
//! pass fails with [`Error::SourceNotReplayable`].
//!
//! Writing stops after the `K`-th window regardless of remaining input;
//! rows beyond it are dropped, counted, and logged. With
//! [`PartitionSizing::Even`] the window is `ceil(total / K)`, so every row
//! lands in a partition and the drop count is zero unless the file changed
//! between passes.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{Error, PartitionSizing, PipelineConfig, Result};

/// The outcome of a partitioning run.
#[derive(Debug, Clone)]
pub struct PartitionSet {
    /// Paths of the written partition files, in index order.
    pub paths: Vec<PathBuf>,
    /// Rows counted in the first pass.
    pub total_records: usize,
    /// Rows beyond the final window, dropped in the second pass.
    pub dropped_records: usize,
}

/// Split `input` into `config.partition_count()` partition files named
/// `<basename>_<index>.csv` under `output_dir`.
///
/// Every partition carries the source header. Row order is preserved
/// within and across partitions.
///
/// # Errors
///
/// - [`Error::SchemaError`] if the configured record-id or text column is
///   missing from the header (checked before anything is written);
/// - [`Error::SourceNotReplayable`] if the source cannot be opened for the
///   second pass;
/// - [`Error::Csv`] / [`Error::Io`] on read or write failures.
pub fn partition(
    input: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    basename: &str,
    config: &PipelineConfig,
) -> Result<PartitionSet> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();
    let k = config.partition_count();

    // Pass 1: fix the schema and count rows.
    let mut reader = csv::Reader::from_path(input)?;
    let headers = reader.headers()?.clone();
    require_column(&headers, config.record_id_column())?;
    require_column(&headers, config.text_column())?;

    let mut total = 0usize;
    for row in reader.byte_records() {
        row?;
        total += 1;
    }

    // Pass 2: replay the source. A reopen failure means the source was
    // consumable only once.
    let mut reader =
        csv::Reader::from_path(input).map_err(|e| Error::SourceNotReplayable {
            path: input.display().to_string(),
            reason: e.to_string(),
        })?;

    let window = match config.sizing() {
        PartitionSizing::Even => total.div_ceil(k).max(1),
        PartitionSizing::SingleDominant => total.max(1),
    };
    info!(total, partitions = k, window, sizing = ?config.sizing(), "partitioning source");

    let mut rows = reader.byte_records();
    let mut paths = Vec::with_capacity(k);

    for index in 0..k {
        let path = output_dir.join(format!("{basename}_{index}.csv"));
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(&headers)?;

        let mut written = 0usize;
        while written < window {
            let Some(row) = rows.next() else { break };
            writer.write_byte_record(&row?)?;
            written += 1;
        }
        writer.flush()?;
        debug!(partition = index, rows = written, path = %path.display(), "partition written");
        paths.push(path);
    }

    // Rows beyond the K-th window are dropped, not carried over.
    let mut dropped = 0usize;
    for row in rows {
        row?;
        dropped += 1;
    }
    if dropped > 0 {
        warn!(dropped, "rows beyond the final partition window were dropped");
    }

    Ok(PartitionSet {
        paths,
        total_records: total,
        dropped_records: dropped,
    })
}

/// Index of `column` in `headers`, or a [`Error::SchemaError`].
pub(crate) fn require_column(headers: &csv::StringRecord, column: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| Error::SchemaError {
            column: column.to_string(),
        })
}
