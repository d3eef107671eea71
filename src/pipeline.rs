//! End-to-end record preparation.
//!
//! Wires the stages together over CSV files:
//!
//! ```text
//! partition -> {per-partition rows} -> normalize -> segment -> pack -> assign ids
//! ```
//!
//! Per-record problems never abort a run. A record is *excluded* when its
//! text is missing or too short after normalization, and *failed* when the
//! segmenter errors on it; both are counted in the [`RunSummary`] and the
//! run continues. Only schema and I/O errors are fatal.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::partition::{partition, require_column, PartitionSet};
use crate::{
    normalize, pack, BlockIdAssigner, Error, PipelineConfig, Result, Segmenter,
};

/// Per-run outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records that produced at least the normalization stage's output and
    /// went on to packing.
    pub processed: usize,
    /// Records excluded for missing or too-short text.
    pub excluded: usize,
    /// Records the segmenter failed on.
    pub failed: usize,
    /// Total blocks written.
    pub blocks_emitted: usize,
}

impl RunSummary {
    /// Fold another partition's counts into this summary.
    pub fn merge(&mut self, other: &Self) {
        self.processed += other.processed;
        self.excluded += other.excluded;
        self.failed += other.failed;
        self.blocks_emitted += other.blocks_emitted;
    }
}

/// The record-preparation pipeline: normalization, segmentation, packing,
/// and identifier assignment over CSV partitions.
///
/// One pipeline instance owns one run's identifier space. The counter is
/// plain mutable state; parallel callers must serialize access to it.
///
/// ## Example
///
/// ```rust,no_run
/// use notepack::{NotePipeline, PipelineConfig, UnicodeSegmenter};
///
/// let config = PipelineConfig::new().with_partition_count(4)?;
/// let mut pipeline = NotePipeline::new(&UnicodeSegmenter, config);
/// let summary = pipeline.run("notes.csv", "out", "notes_part", "blocks.csv")?;
/// println!("processed {} records, {} excluded", summary.processed, summary.excluded);
/// # Ok::<(), notepack::Error>(())
/// ```
pub struct NotePipeline<'a> {
    segmenter: &'a dyn Segmenter,
    config: PipelineConfig,
    ids: BlockIdAssigner,
}

impl<'a> NotePipeline<'a> {
    /// Create a pipeline with a fresh identifier space starting at 0.
    #[must_use]
    pub fn new(segmenter: &'a dyn Segmenter, config: PipelineConfig) -> Self {
        Self {
            segmenter,
            config,
            ids: BlockIdAssigner::new(),
        }
    }

    /// Continue an existing identifier space, e.g. when partitions of one
    /// logical run are processed by separate invocations.
    #[must_use]
    pub fn with_start_id(segmenter: &'a dyn Segmenter, config: PipelineConfig, start: u64) -> Self {
        Self {
            segmenter,
            config,
            ids: BlockIdAssigner::with_start(start),
        }
    }

    /// The identifier the next emitted block will receive.
    #[must_use]
    pub fn next_block_id(&self) -> u64 {
        self.ids.next_id()
    }

    /// Full run: partition `input` into `output_dir/<basename>_<i>.csv`,
    /// then process every partition in order into one output file with
    /// columns `record_id, block_id, block_text`.
    ///
    /// # Errors
    ///
    /// Fatal errors only: [`Error::SchemaError`],
    /// [`Error::SourceNotReplayable`], and I/O or CSV failures.
    pub fn run(
        &mut self,
        input: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        basename: &str,
        output_file: impl AsRef<Path>,
    ) -> Result<RunSummary> {
        let partitions: PartitionSet =
            partition(input, output_dir.as_ref(), basename, &self.config)?;

        // Header written up front so an all-excluded run still yields the
        // schema; auto-headers are off to keep it single.
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(output_file.as_ref())?;
        writer.write_record(["record_id", "block_id", "block_text"])?;

        let mut summary = RunSummary::default();
        for path in &partitions.paths {
            let part = self.process_file(path, &mut writer)?;
            summary.merge(&part);
        }
        writer.flush()?;

        info!(
            processed = summary.processed,
            excluded = summary.excluded,
            failed = summary.failed,
            blocks = summary.blocks_emitted,
            "run complete"
        );
        Ok(summary)
    }

    /// Process one partition file, appending output rows to `writer`.
    ///
    /// # Errors
    ///
    /// Fatal errors only; per-record exclusions and segmentation failures
    /// are counted in the returned [`RunSummary`].
    pub fn process_file<W: std::io::Write>(
        &mut self,
        input: impl AsRef<Path>,
        writer: &mut csv::Writer<W>,
    ) -> Result<RunSummary> {
        let input = input.as_ref();
        let mut reader = csv::Reader::from_path(input)?;
        let headers = reader.headers()?.clone();
        let id_idx = require_column(&headers, self.config.record_id_column())?;
        let text_idx = require_column(&headers, self.config.text_column())?;

        let mut summary = RunSummary::default();
        for row in reader.records() {
            let row = row?;
            let record_id = row.get(id_idx).unwrap_or_default().to_string();

            // Missing text is a type-level branch, not a failure.
            let Some(text) = row.get(text_idx) else {
                summary.excluded += 1;
                debug!(%record_id, "excluded: text field absent");
                continue;
            };

            let normalized = normalize(text);
            if normalized.len() < self.config.min_text_length() {
                summary.excluded += 1;
                debug!(
                    %record_id,
                    length = normalized.len(),
                    "excluded: below minimum text length"
                );
                continue;
            }

            let sentences = match self.segmenter.segment(&normalized) {
                Ok(sentences) => sentences,
                Err(e) => {
                    summary.failed += 1;
                    let err = Error::Segmentation {
                        record_id: record_id.clone(),
                        reason: e.to_string(),
                    };
                    warn!(%record_id, error = %err, "record skipped");
                    continue;
                }
            };

            let blocks = pack(sentences, self.config.token_ceiling());
            let units = self.ids.assign(&record_id, blocks);
            summary.blocks_emitted += units.len();
            for unit in &units {
                writer.serialize(unit)?;
            }
            summary.processed += 1;
        }

        debug!(
            path = %input.display(),
            processed = summary.processed,
            excluded = summary.excluded,
            failed = summary.failed,
            "partition processed"
        );
        Ok(summary)
    }
}
