//! # notepack
//!
//! Prepares large free-text record collections (clinical notes) for a
//! fixed-input-length text model.
//!
//! ## The Problem
//!
//! Downstream models have a hard input-length limit. Clinical notes don't
//! fit: they are long, noisy, and arrive by the million in one oversized
//! table. Three things have to happen before the model sees anything:
//!
//! - The source must be split into partitions small enough to process.
//! - The text must be normalized: EHR exports are full of stray Unicode,
//!   decorative punctuation runs, and erratic whitespace.
//! - Each record's sentences must be regrouped into blocks that fit the
//!   input budget, without ever splitting a sentence, and with a stable
//!   identifier space across blocks so every block maps back to its note.
//!
//! ## The Pipeline
//!
//! ```text
//! partitioner -> {per-partition rows} -> normalizer -> segmenter
//!             -> packer -> id assigner -> output rows
//! ```
//!
//! - [`partition`](partition()): two-pass CSV splitter. One pass counts,
//!   one pass writes windows; sources that can't be read twice fail with
//!   [`Error::SourceNotReplayable`].
//! - [`normalize`](normalize()): deterministic, idempotent canonicalization to
//!   lowercase ASCII with single spaces.
//! - [`Segmenter`]: the sentence-boundary seam. [`UnicodeSegmenter`]
//!   (UAX #29) is the default; bring your own if you have a domain one.
//! - [`pack`](pack()): greedy, order-preserving grouping of sentences under a
//!   word-count ceiling. Oversized single sentences are emitted alone
//!   rather than dropped.
//! - [`BlockIdAssigner`]: strictly increasing block identifiers across the
//!   whole run, held as an explicit counter value.
//!
//! Token counts are approximate by design: whitespace-delimited words, not
//! the downstream tokenizer's subwords. Budget the ceiling accordingly.
//!
//! ## Quick Start
//!
//! ```rust
//! use notepack::{normalize, pack, BlockIdAssigner, Segmenter, UnicodeSegmenter};
//!
//! let raw = "Pt c/o   pain!!!  Given ibuprofen. Plan: follow up in 2 weeks.";
//! let clean = normalize(raw);
//! assert_eq!(clean, "pt c/o pain given ibuprofen. plan: follow up in 2 weeks.");
//!
//! let sentences = UnicodeSegmenter.segment(&clean).unwrap();
//! let blocks = pack(sentences, 500);
//!
//! let mut ids = BlockIdAssigner::new();
//! let units = ids.assign("note-42", blocks);
//! assert_eq!(units[0].block_id, 0);
//! ```
//!
//! For whole files, [`NotePipeline`] drives the stages over CSV partitions
//! and reports a [`RunSummary`] of processed / excluded / failed records:
//!
//! ```rust,no_run
//! use notepack::{NotePipeline, PipelineConfig, UnicodeSegmenter};
//!
//! let config = PipelineConfig::new()
//!     .with_token_ceiling(500)?
//!     .with_partition_count(8)?;
//! let mut pipeline = NotePipeline::new(&UnicodeSegmenter, config);
//! let summary = pipeline.run("notes.csv", "out", "notes_part", "blocks.csv")?;
//! # Ok::<(), notepack::Error>(())
//! ```
//!
//! ## Guarantees
//!
//! - Normalization is idempotent and locale-free.
//! - Packing preserves sentence order exactly: concatenating the blocks'
//!   sentences reconstructs the segmenter's output.
//! - Every multi-sentence block respects the ceiling; only a block forced
//!   to hold one oversized sentence may exceed it.
//! - Block identifiers are unique and strictly increasing per run, across
//!   all records.
//! - Per-record problems (missing text, too-short text, segmenter errors)
//!   never abort a run; they are counted and reported.

mod block;
mod config;
mod error;
mod ids;
mod normalize;
mod pack;
mod partition;
mod pipeline;
mod segment;

pub use block::{Block, OutputUnit};
pub use config::{PartitionSizing, PipelineConfig};
pub use error::{Error, Result};
pub use ids::BlockIdAssigner;
pub use normalize::normalize;
pub use pack::{pack, word_count};
pub use partition::{partition, PartitionSet};
pub use pipeline::{NotePipeline, RunSummary};
pub use segment::{SegmentError, Segmenter, UnicodeSegmenter};
