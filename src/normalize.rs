//! Text normalization.
//!
//! Clinical free text is noisy: inconsistent casing, smart quotes and other
//! non-ASCII artifacts from EHR copy-paste, decorative punctuation runs
//! (`!!!!`, `-----`, `*****` section dividers), and erratic whitespace.
//! Normalization canonicalizes all of it so that segmentation and word
//! counting see a predictable alphabet.
//!
//! ## The Transform
//!
//! Applied in order:
//!
//! 1. Lowercase everything.
//! 2. Replace each maximal run of non-ASCII or control characters with one
//!    space (tabs and newlines survive to step 4 as whitespace).
//! 3. Replace each maximal run of **3 or more** characters that are neither
//!    ASCII alphanumeric nor whitespace with one space. Runs of 1-2 are
//!    kept: abbreviations like `c/o`, dosages like `0.5%`, and vitals like
//!    `120/80` would be destroyed by a lower threshold.
//! 4. Collapse every whitespace run to a single space.
//! 5. Trim.
//!
//! ```text
//! "Pt c/o   pain!!!  "  ->  "pt c/o pain"
//!        ^        ^
//!        kept     3+ run, squashed
//! ```
//!
//! The transform is deterministic, locale-free, and idempotent: output fed
//! back in comes out unchanged. Exclusion of too-short or missing text is
//! the caller's decision, not this function's (see the pipeline module).

/// Normalize raw free text into canonical form.
///
/// The output contains only lowercase ASCII letters, digits, single spaces,
/// and punctuation runs of length at most two, with no leading or trailing
/// whitespace.
///
/// ## Example
///
/// ```rust
/// use notepack::normalize;
///
/// assert_eq!(normalize("Pt c/o   pain!!!  "), "pt c/o pain");
/// assert_eq!(normalize("pt c/o pain"), "pt c/o pain"); // idempotent
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    // Lowercase, then squash every run of characters that are neither
    // printable ASCII nor whitespace (non-ASCII, control bytes) to one
    // space.
    let mut ascii = String::with_capacity(text.len());
    let mut in_stripped = false;
    for ch in text.to_lowercase().chars() {
        if ch.is_ascii_graphic() || ch.is_ascii_whitespace() {
            ascii.push(ch);
            in_stripped = false;
        } else if !in_stripped {
            ascii.push(' ');
            in_stripped = true;
        }
    }

    // Squash runs of 3+ characters that are neither alphanumeric nor
    // whitespace; runs of 1-2 carry meaning and are preserved.
    let mut cleaned = String::with_capacity(ascii.len());
    let mut run = String::new();
    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() || ch.is_ascii_whitespace() {
            flush_punctuation_run(&mut cleaned, &mut run);
            cleaned.push(ch);
        } else {
            run.push(ch);
        }
    }
    flush_punctuation_run(&mut cleaned, &mut run);

    // Collapse whitespace runs and trim in one go.
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Emit a pending punctuation run: verbatim if short, one space if 3+.
fn flush_punctuation_run(out: &mut String, run: &mut String) {
    if run.is_empty() {
        return;
    }
    // All chars in the run are ASCII at this point, so byte length is
    // character length.
    if run.len() >= 3 {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}
