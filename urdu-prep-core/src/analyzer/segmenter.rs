//! Sentence segmentation.
//!
//! Second stage of the pipeline. Splits each normalized line on the Urdu full
//! stop (`۔`), keeping the delimiter attached to the sentence it closes:
//!
//! ```ignore
//! "سلام۔ کیسے ہو۔ ٹھیک"  ->  ["سلام۔", "کیسے ہو۔", "ٹھیک"]
//! ```
//!
//! ## Rules
//!
//! - Every delimiter closes a sentence. The closed sentence is trimmed and
//!   emitted; it is never empty because it contains at least the delimiter.
//! - Text after the last delimiter becomes a final sentence without a full
//!   stop, unless it trims to nothing. A line that ends on the delimiter
//!   produces no extra empty sentence.
//! - Lines are segmented independently: a sentence never spans two lines, and
//!   line boundaries are not recorded in the output.
//!
//! ## Zero Allocation
//!
//! Sentences are `&str` slices of the input line. The scan uses
//! `memchr::memmem` over the delimiter's UTF-8 bytes. A complete UTF-8
//! encoding can only match at a character boundary, so every slice is valid.

use memchr::memmem;
use urdu_prep_types::{Sentence, URDU_FULL_STOP};

/// Delimiter-inclusive sentence splitter.
///
/// # Example
///
/// ```
/// use urdu_prep_core::analyzer::segmenter::SentenceSegmenter;
///
/// let segmenter = SentenceSegmenter::default();
/// let sentences = segmenter.segment(["سلام۔ کیسے ہو۔"]);
/// assert_eq!(sentences, ["سلام۔", "کیسے ہو۔"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SentenceSegmenter {
    delimiter: char,
}

impl Default for SentenceSegmenter {
    fn default() -> Self {
        Self::new(URDU_FULL_STOP)
    }
}

impl SentenceSegmenter {
    /// Creates a segmenter that splits on `delimiter`.
    #[inline]
    pub const fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Segments one line, emitting each sentence in order.
    pub fn segment_line<'n, F>(&self, line: &'n str, mut emit: F)
    where
        F: FnMut(Sentence<'n>),
    {
        let mut buf = [0u8; 4];
        let needle = self.delimiter.encode_utf8(&mut buf).as_bytes();
        let mut start = 0usize;

        for i in memmem::find_iter(line.as_bytes(), needle) {
            let end = i + needle.len();
            let sentence = line[start..end].trim();
            debug_assert!(!sentence.is_empty());
            emit(sentence);
            start = end;
        }

        let tail = line[start..].trim();
        if !tail.is_empty() {
            emit(tail);
        }
    }

    /// Segments every line and concatenates the sentences in input order.
    pub fn segment<'n, I, S>(&self, lines: I) -> Vec<Sentence<'n>>
    where
        I: IntoIterator<Item = &'n S>,
        S: AsRef<str> + ?Sized + 'n,
    {
        let mut out = Vec::new();
        for line in lines {
            self.segment_line(line.as_ref(), |s| out.push(s));
        }
        out
    }
}
