//! Sentence segmentation seam.
//!
//! Sentence boundary detection is an external concern: the packer only
//! needs "an ordered sequence of sentence strings" and has no opinion on
//! how boundaries are found. The [`Segmenter`] trait is that seam — plug in
//! a clinical-domain splitter if you have one.
//!
//! The default, [`UnicodeSegmenter`], uses Unicode Standard Annex #29
//! sentence boundaries, which handle abbreviations (Dr., q.d.), decimal
//! numbers (38.5), and ellipses better than naive period splitting. No
//! linguistic correctness is guaranteed; the pipeline's ordering and
//! packing invariants hold for whatever boundaries come back.

use unicode_segmentation::UnicodeSegmentation;

/// Error raised by a [`Segmenter`] implementation on malformed input.
///
/// The pipeline recovers from this per record: the record is excluded,
/// logged, and the run continues.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct SegmentError(
    /// Failure description.
    pub String,
);

/// Splits normalized text into an ordered sequence of sentences.
///
/// Implementations must return sentences in left-to-right document order
/// with no overlaps or gaps.
pub trait Segmenter: Send + Sync {
    /// Split `text` into sentences.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentError`] if the input cannot be segmented.
    fn segment(&self, text: &str) -> Result<Vec<String>, SegmentError>;
}

/// Default segmenter over UAX #29 sentence boundaries.
///
/// ## Example
///
/// ```rust
/// use notepack::{Segmenter, UnicodeSegmenter};
///
/// let segmenter = UnicodeSegmenter;
/// let sentences = segmenter.segment("chest clear. no edema.").unwrap();
/// assert_eq!(sentences, vec!["chest clear.", "no edema."]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSegmenter;

impl Segmenter for UnicodeSegmenter {
    fn segment(&self, text: &str) -> Result<Vec<String>, SegmentError> {
        Ok(text
            .split_sentence_bounds()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect())
    }
}
