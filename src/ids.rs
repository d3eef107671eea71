//! Block identifier assignment.
//!
//! Every emitted block gets an identifier that is unique and strictly
//! increasing across the whole run, regardless of which record produced it.
//! The counter is an explicit value owned by whoever drives the run — not
//! ambient global state — so multi-partition runs can continue an existing
//! identifier space by constructing the assigner with a start offset.
//!
//! Not thread-safe: the counter is plain mutable state. If blocks are ever
//! produced from parallel workers, assignment must stay behind a single
//! serialization point (a lock or a single-consumer channel).

use crate::{Block, OutputUnit};

/// Run-scoped assigner of strictly increasing block identifiers.
///
/// ## Example
///
/// ```rust
/// use notepack::{pack, BlockIdAssigner};
///
/// let mut ids = BlockIdAssigner::new();
/// let blocks = pack(vec!["one two.".into(), "three four.".into()], 2);
///
/// let units = ids.assign("note-17", blocks);
/// assert_eq!(units[0].block_id, 0);
/// assert_eq!(units[1].block_id, 1);
/// assert_eq!(units[0].record_id, "note-17");
/// assert_eq!(ids.next_id(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlockIdAssigner {
    next: u64,
}

impl BlockIdAssigner {
    /// Create an assigner starting at identifier 0.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Create an assigner starting at `start`, for continuing the
    /// identifier space of an earlier partition.
    #[must_use]
    pub fn with_start(start: u64) -> Self {
        Self { next: start }
    }

    /// The identifier the next assigned block will receive.
    #[must_use]
    pub fn next_id(&self) -> u64 {
        self.next
    }

    /// Attribute `blocks` to `record_id`, assigning each the next
    /// identifier in order.
    pub fn assign(&mut self, record_id: &str, blocks: Vec<Block>) -> Vec<OutputUnit> {
        blocks
            .into_iter()
            .map(|block| {
                let unit = OutputUnit {
                    record_id: record_id.to_string(),
                    block_id: self.next,
                    block_text: block.text(),
                };
                self.next += 1;
                unit
            })
            .collect()
    }
}
