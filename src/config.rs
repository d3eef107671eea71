//! Pipeline configuration.
//!
//! ## The Knobs That Matter
//!
//! Two numbers dominate output quality:
//!
//! - `token_ceiling`: the word budget per block. This should sit comfortably
//!   under the downstream model's input limit, with headroom for the gap
//!   between whitespace word counts and real subword token counts.
//! - `min_text_length`: records whose normalized text is shorter than this
//!   are excluded. Very short notes ("ok", "see above") carry no signal and
//!   pollute the output with near-empty blocks.
//!
//! Token counts here are approximate by design: a whitespace-delimited word
//! count, not the downstream tokenizer's subword count. A ceiling of 500
//! words typically lands around 600-700 subword tokens for clinical prose.

use crate::{Error, Result};

/// How the partitioner derives its per-partition window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartitionSizing {
    /// `ceil(total / partition_count)`: partitions of (near-)equal size.
    #[default]
    Even,

    /// Window size equals the total record count, so the first partition
    /// absorbs every record and the remaining partitions are empty.
    ///
    /// This reproduces the sizing of the system this crate was modeled on.
    /// It is almost never what you want for new work; it exists so runs
    /// against data partitioned by that system can be matched exactly.
    SingleDominant,
}

/// Configuration for a preparation run.
///
/// Construct with [`PipelineConfig::new`] and adjust via the `with_*`
/// methods, which validate their inputs:
///
/// ```rust
/// use notepack::PipelineConfig;
///
/// let config = PipelineConfig::new()
///     .with_token_ceiling(400)?
///     .with_partition_count(4)?;
/// assert_eq!(config.token_ceiling(), 400);
/// # Ok::<(), notepack::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    token_ceiling: usize,
    min_text_length: usize,
    partition_count: usize,
    sizing: PartitionSizing,
    record_id_column: String,
    text_column: String,
}

impl PipelineConfig {
    /// Create a configuration with the defaults: ceiling 500, minimum
    /// normalized length 10, one partition, even sizing, columns
    /// `record_id` / `text`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            token_ceiling: 500,
            min_text_length: 10,
            partition_count: 1,
            sizing: PartitionSizing::Even,
            record_id_column: "record_id".to_string(),
            text_column: "text".to_string(),
        }
    }

    /// The approximate word-count budget per block.
    #[must_use]
    pub const fn token_ceiling(&self) -> usize {
        self.token_ceiling
    }

    /// Minimum normalized text length below which a record is excluded.
    #[must_use]
    pub const fn min_text_length(&self) -> usize {
        self.min_text_length
    }

    /// Number of partitions the source is split into.
    #[must_use]
    pub const fn partition_count(&self) -> usize {
        self.partition_count
    }

    /// Partition sizing strategy.
    #[must_use]
    pub const fn sizing(&self) -> PartitionSizing {
        self.sizing
    }

    /// Name of the record-identifier column in the source.
    #[must_use]
    pub fn record_id_column(&self) -> &str {
        &self.record_id_column
    }

    /// Name of the free-text column in the source.
    #[must_use]
    pub fn text_column(&self) -> &str {
        &self.text_column
    }

    /// Set the per-block word budget.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTokenCeiling`] if `ceiling == 0`.
    pub fn with_token_ceiling(mut self, ceiling: usize) -> Result<Self> {
        if ceiling == 0 {
            return Err(Error::InvalidTokenCeiling(ceiling));
        }
        self.token_ceiling = ceiling;
        Ok(self)
    }

    /// Set the minimum normalized text length. Zero disables the check.
    #[must_use]
    pub fn with_min_text_length(mut self, min: usize) -> Self {
        self.min_text_length = min;
        self
    }

    /// Set the partition count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPartitionCount`] if `count == 0`.
    pub fn with_partition_count(mut self, count: usize) -> Result<Self> {
        if count == 0 {
            return Err(Error::InvalidPartitionCount(count));
        }
        self.partition_count = count;
        Ok(self)
    }

    /// Set the partition sizing strategy.
    #[must_use]
    pub fn with_sizing(mut self, sizing: PartitionSizing) -> Self {
        self.sizing = sizing;
        self
    }

    /// Set the source column names for the record identifier and text.
    #[must_use]
    pub fn with_columns(mut self, record_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.record_id_column = record_id.into();
        self.text_column = text.into();
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}
