//! Core types for the Urdu corpus preparation pipeline.
//!
//! This crate holds the small value types that the pipeline stages and the
//! command-line driver pass between each other. Keeping them separate means:
//!
//! - **No dependencies**: the types compile without pulling in I/O or logging
//! - **Cross-crate compatibility**: the core library and the binary agree on one vocabulary
//! - **Clean boundaries**: analysis code never depends on the driver

#![warn(missing_docs)]

use core::fmt;

/// The Urdu full stop (U+06D4), the only sentence delimiter.
pub const URDU_FULL_STOP: char = '\u{06D4}';

/// Number of sentences per window when nothing else is configured.
pub const DEFAULT_GROUP_SIZE: usize = 5;

/// 1-based line number in a source file. The header is line 1.
pub type LineNo = usize;

/// A sentence: a trimmed slice of one normalized line.
///
/// Never empty and never spans two lines.
pub type Sentence<'a> = &'a str;

/// A source row reduced to the one field the pipeline cares about.
///
/// Records carry no identity beyond their position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Line the record was read from.
    pub line: LineNo,
    /// Raw, un-normalized sentence text.
    pub text: String,
}

impl RawRecord {
    /// Creates a record.
    #[inline]
    pub fn new(line: LineNo, text: impl Into<String>) -> Self {
        Self {
            line,
            text: text.into(),
        }
    }
}

/// Why a source row was skipped.
///
/// None of these abort a run. `TooFewColumns` and `EmptyField` are
/// malformed rows and are dropped quietly; `InvalidUtf8` is a processing
/// failure and is worth a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    /// The row has fewer columns than the text column index requires.
    TooFewColumns {
        /// Offending line.
        line: LineNo,
        /// Columns present after splitting on tabs.
        found: usize,
        /// Columns needed to reach the text column.
        required: usize,
    },
    /// The text column exists but is empty.
    EmptyField {
        /// Offending line.
        line: LineNo,
    },
    /// The row is not valid UTF-8.
    InvalidUtf8 {
        /// Offending line.
        line: LineNo,
    },
}

impl RecordError {
    /// Line the error refers to.
    #[inline]
    pub const fn line(&self) -> LineNo {
        match *self {
            RecordError::TooFewColumns { line, .. }
            | RecordError::EmptyField { line }
            | RecordError::InvalidUtf8 { line } => line,
        }
    }

    /// `true` for rows that are simply shaped wrong, `false` for rows that
    /// failed while being processed.
    #[inline]
    pub const fn is_malformed(&self) -> bool {
        !matches!(self, RecordError::InvalidUtf8 { .. })
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::TooFewColumns {
                line,
                found,
                required,
            } => write!(
                f,
                "line {}: expected at least {} columns, found {}",
                line, required, found
            ),
            RecordError::EmptyField { line } => write!(f, "line {}: text column is empty", line),
            RecordError::InvalidUtf8 { line } => write!(f, "line {}: not valid UTF-8", line),
        }
    }
}

impl core::error::Error for RecordError {}

/// Sliding-window configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    /// Sentences per window. Must be positive.
    pub group_size: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            group_size: DEFAULT_GROUP_SIZE,
        }
    }
}

impl WindowConfig {
    /// Creates a configuration with the given group size.
    pub const fn new(group_size: usize) -> Self {
        Self { group_size }
    }
}

/// A borrowed run of `group_size` consecutive sentences.
///
/// Identified only by `start`, the index of its first sentence in the
/// corpus-wide sentence sequence. Rendering with `Display` joins the
/// sentences with a single ASCII space, which is the persisted format.
#[derive(Debug, PartialEq, Eq)]
pub struct SentenceWindow<'a, S> {
    start: usize,
    sentences: &'a [S],
}

impl<S> Clone for SentenceWindow<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for SentenceWindow<'_, S> {}

impl<'a, S> SentenceWindow<'a, S> {
    /// Creates a window view starting at `start`.
    #[inline(always)]
    pub const fn new(start: usize, sentences: &'a [S]) -> Self {
        Self { start, sentences }
    }

    /// Index of the first sentence of this window.
    #[inline(always)]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Number of sentences in the window.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Returns `true` if the window holds no sentences.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// The sentences, in corpus order.
    #[inline(always)]
    pub const fn sentences(&self) -> &'a [S] {
        self.sentences
    }
}

impl<S: AsRef<str>> fmt::Display for SentenceWindow<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.sentences.iter();
        if let Some(first) = iter.next() {
            f.write_str(first.as_ref())?;
            for sentence in iter {
                f.write_str(" ")?;
                f.write_str(sentence.as_ref())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_renders_space_joined() {
        let sentences = ["ایک۔", "دو۔", "تین"];
        let window = SentenceWindow::new(0, &sentences[..]);
        assert_eq!(window.to_string(), "ایک۔ دو۔ تین");
    }

    #[test]
    fn window_renders_owned_strings() {
        let sentences = vec![String::from("a۔"), String::from("b۔")];
        let window = SentenceWindow::new(3, &sentences[..]);
        assert_eq!(window.start(), 3);
        assert_eq!(window.to_string(), "a۔ b۔");
    }

    #[test]
    fn empty_window_renders_empty() {
        let sentences: [&str; 0] = [];
        let window = SentenceWindow::new(0, &sentences[..]);
        assert!(window.is_empty());
        assert_eq!(window.to_string(), "");
    }

    #[test]
    fn window_is_copy() {
        let sentences = ["x"];
        let a = SentenceWindow::new(0, &sentences[..]);
        let b = a;
        assert_eq!(a, b);
    }

    #[test]
    fn record_error_line_and_kind() {
        let short = RecordError::TooFewColumns {
            line: 4,
            found: 2,
            required: 3,
        };
        assert_eq!(short.line(), 4);
        assert!(short.is_malformed());
        assert!(RecordError::EmptyField { line: 2 }.is_malformed());
        assert!(!RecordError::InvalidUtf8 { line: 9 }.is_malformed());
    }

    #[test]
    fn record_error_display() {
        let err = RecordError::TooFewColumns {
            line: 7,
            found: 1,
            required: 3,
        };
        assert_eq!(err.to_string(), "line 7: expected at least 3 columns, found 1");
        assert_eq!(
            RecordError::InvalidUtf8 { line: 2 }.to_string(),
            "line 2: not valid UTF-8"
        );
    }

    #[test]
    fn default_window_config() {
        assert_eq!(WindowConfig::default().group_size, 5);
        assert_eq!(WindowConfig::new(3).group_size, 3);
    }

    #[test]
    fn full_stop_is_single_char() {
        assert_eq!(URDU_FULL_STOP.len_utf8(), 2);
        assert_eq!(URDU_FULL_STOP.to_string(), "۔");
    }
}
