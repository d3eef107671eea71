//! Greedy token-budgeted sentence packing.
//!
//! ## The Problem
//!
//! A fixed-input-length model needs inputs under some token limit, but
//! clinical notes run long and sentences must never be split mid-thought.
//! So: group consecutive sentences into the fewest left-to-right blocks
//! whose approximate token count stays under a ceiling.
//!
//! ## The Algorithm
//!
//! Single greedy pass, order-preserving:
//!
//! ```text
//! ceiling = 500
//! word counts: [200, 200, 200]
//!
//! s1 (200): 0   + 200 <= 500  -> group [s1],     length 200
//! s2 (200): 200 + 200 <= 500  -> group [s1, s2], length 400
//! s3 (200): 400 + 200 >  500  -> close [s1, s2], start [s3]
//!
//! blocks: [[s1, s2], [s3]]
//! ```
//!
//! The ceiling is a soft target in exactly one situation: a single sentence
//! whose own word count exceeds the ceiling is emitted alone as an
//! oversized block. Nothing is ever dropped or truncated, so concatenating
//! the blocks' sentences reproduces the input sequence exactly.
//!
//! Greedy is optimal here in the sense that matters: with order fixed and
//! no splitting allowed, closing a group as late as possible minimizes the
//! number of blocks.

use crate::Block;

/// Count whitespace-delimited words.
///
/// This is the pipeline's token approximation throughout; it intentionally
/// does not model any downstream subword tokenizer.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Pack ordered sentences into blocks under a word-count ceiling.
///
/// Every block except an oversized singleton satisfies
/// `approx_token_count <= ceiling`. Sentence order is preserved, no
/// sentence appears in more than one block, and no block is empty.
/// Whitespace-only sentences are skipped.
///
/// `ceiling` must be positive; configuration validates this before the
/// packer runs (see [`PipelineConfig`](crate::PipelineConfig)).
///
/// ## Example
///
/// ```rust
/// use notepack::pack;
///
/// let sentences: Vec<String> = vec![
///     "one two three.".into(),
///     "four five.".into(),
///     "six seven eight nine.".into(),
/// ];
/// let blocks = pack(sentences, 5);
///
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].text(), "one two three. four five.");
/// assert_eq!(blocks[1].text(), "six seven eight nine.");
/// ```
#[must_use]
pub fn pack(sentences: Vec<String>, ceiling: usize) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut group: Vec<String> = Vec::new();
    let mut group_len = 0usize;

    for sentence in sentences {
        let wc = word_count(&sentence);
        if wc == 0 {
            continue;
        }

        if group_len + wc <= ceiling || group.is_empty() {
            // Fits, or the group is empty and the sentence alone exceeds
            // the ceiling: take it anyway rather than drop it.
            group.push(sentence);
            group_len += wc;
        } else {
            blocks.push(Block::new(std::mem::take(&mut group), group_len));
            group.push(sentence);
            group_len = wc;
        }
    }

    if !group.is_empty() {
        blocks.push(Block::new(group, group_len));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences_of(word_counts: &[usize]) -> Vec<String> {
        word_counts
            .iter()
            .map(|&n| vec!["word"; n].join(" "))
            .collect()
    }

    #[test]
    fn groups_under_ceiling() {
        // 200 + 200 = 400 <= 500; + 200 = 600 > 500 closes the group.
        let blocks = pack(sentences_of(&[200, 200, 200]), 500);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].len(), 2);
        assert_eq!(blocks[0].approx_token_count, 400);
        assert_eq!(blocks[1].len(), 1);
        assert_eq!(blocks[1].approx_token_count, 200);
    }

    #[test]
    fn oversized_singleton_emitted_alone() {
        let blocks = pack(sentences_of(&[600]), 500);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].approx_token_count, 600);
    }

    #[test]
    fn oversized_sentence_between_normal_ones() {
        let blocks = pack(sentences_of(&[100, 600, 100]), 500);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1].approx_token_count, 600);
        assert_eq!(blocks[2].approx_token_count, 100);
    }

    #[test]
    fn exact_fit_stays_in_group() {
        let blocks = pack(sentences_of(&[300, 200]), 500);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].approx_token_count, 500);
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(pack(Vec::new(), 500).is_empty());
    }

    #[test]
    fn whitespace_only_sentences_skipped() {
        let blocks = pack(vec!["   ".into(), "real words here.".into()], 500);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].len(), 1);
    }

    #[test]
    fn reconstructs_input_sequence() {
        let input = sentences_of(&[3, 7, 2, 9, 1, 4]);
        let blocks = pack(input.clone(), 10);
        let flattened: Vec<String> = blocks.into_iter().flat_map(|b| b.sentences).collect();
        assert_eq!(flattened, input);
    }

    #[test]
    fn no_multi_sentence_block_exceeds_ceiling() {
        let blocks = pack(sentences_of(&[4, 4, 4, 4, 4, 11, 4]), 10);
        for block in &blocks {
            if block.len() > 1 {
                assert!(block.approx_token_count <= 10, "oversized: {block}");
            }
        }
    }

    #[test]
    fn word_count_is_whitespace_delimited() {
        assert_eq!(word_count("a b  c\td"), 4);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }
}
