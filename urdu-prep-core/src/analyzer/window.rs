//! Sliding sentence windows.
//!
//! Final stage of the pipeline. Turns the corpus-wide sentence sequence into
//! overlapping groups of `size` consecutive sentences, advancing one sentence
//! at a time. Windows are views into the sentence slice, never copies.

use urdu_prep_types::{SentenceWindow, WindowConfig};

/// Iterates over every window of `size` sentences.
///
/// For `n` sentences, exactly `max(0, n - size + 1)` windows are produced,
/// starting at indices `0..=n - size`. Fewer than `size` sentences, or a
/// `size` of zero, produce nothing: windows are never padded or partial.
///
/// # Example
///
/// ```
/// use urdu_prep_core::analyzer::window::windows;
///
/// let sentences = ["a۔", "b۔", "c۔", "d۔"];
/// let rendered: Vec<String> = windows(&sentences, 3).map(|w| w.to_string()).collect();
///
/// assert_eq!(rendered, ["a۔ b۔ c۔", "b۔ c۔ d۔"]);
/// ```
#[inline]
pub fn windows<S>(sentences: &[S], size: usize) -> impl Iterator<Item = SentenceWindow<'_, S>> {
    // `slice::windows` panics on zero and already yields nothing when short.
    let live = if size == 0 { &sentences[..0] } else { sentences };

    live.windows(size.max(1))
        .enumerate()
        .map(|(start, group)| SentenceWindow::new(start, group))
}

/// Number of windows [`windows`] yields for `len` sentences.
#[inline(always)]
pub const fn count_windows(len: usize, size: usize) -> usize {
    if size == 0 || len < size {
        0
    } else {
        len - size + 1
    }
}

/// Produces sentence windows using a fixed configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlidingWindow {
    config: WindowConfig,
}

impl SlidingWindow {
    /// Creates a windower for `config.group_size` sentences per window.
    #[inline]
    pub const fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    /// Sentences per window.
    #[inline]
    pub const fn group_size(&self) -> usize {
        self.config.group_size
    }

    /// Iterates over the windows of `sentences`.
    #[inline]
    pub fn windows<'a, S>(
        &self,
        sentences: &'a [S],
    ) -> impl Iterator<Item = SentenceWindow<'a, S>> {
        windows(sentences, self.config.group_size)
    }

    /// Number of windows for `len` sentences.
    #[inline]
    pub const fn count(&self, len: usize) -> usize {
        count_windows(len, self.config.group_size)
    }
}
