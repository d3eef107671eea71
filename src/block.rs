//! The Block type: a token-budgeted group of consecutive sentences.

use serde::{Deserialize, Serialize};

/// A group of consecutive sentences from one record, sized to fit a
/// downstream model's input budget.
///
/// Blocks are produced by [`pack`](crate::pack()) and are never empty. The
/// sentences are kept separate so callers can audit the grouping; the
/// emitted form joins them with single spaces (see [`Block::text`]), which
/// means block text is not byte-identical to the source text — only the
/// sentence sequence is reconstructible.
///
/// ## Example
///
/// ```rust
/// use notepack::pack;
///
/// let sentences = vec!["bp stable.".to_string(), "no acute distress.".to_string()];
/// let blocks = pack(sentences, 500);
///
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].text(), "bp stable. no acute distress.");
/// assert_eq!(blocks[0].approx_token_count, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The constituent sentences, in original document order.
    pub sentences: Vec<String>,
    /// Sum of whitespace-delimited word counts across the sentences.
    ///
    /// An approximation of the downstream token count, not the subword
    /// tokenizer's number.
    pub approx_token_count: usize,
}

impl Block {
    /// Create a block from sentences and their summed word count.
    #[must_use]
    pub fn new(sentences: Vec<String>, approx_token_count: usize) -> Self {
        Self {
            sentences,
            approx_token_count,
        }
    }

    /// The block's emitted text: sentences joined by single spaces.
    #[must_use]
    pub fn text(&self) -> String {
        self.sentences.join(" ")
    }

    /// Number of sentences in this block.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Whether this block has no sentences. Always `false` for blocks
    /// produced by the packer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Block {{ sentences: {}, approx_tokens: {} }}",
            self.len(),
            self.approx_token_count
        )
    }
}

/// One output row: a block attributed to its source record.
///
/// `block_id` is unique within a run and strictly increasing in emission
/// order, across all records (see [`BlockIdAssigner`](crate::BlockIdAssigner)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputUnit {
    /// Opaque stable key of the originating record.
    pub record_id: String,
    /// Run-unique, strictly increasing block identifier.
    pub block_id: u64,
    /// The block's text, sentences joined by single spaces.
    pub block_text: String,
}
