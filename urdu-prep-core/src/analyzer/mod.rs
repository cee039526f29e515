//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **Normalizer**: Cleans Urdu script (diacritics, letterforms, joiners, punctuation)
//! - **Segmenter**: Splits normalized lines into full-stop terminated sentences
//! - **Window**: Groups consecutive sentences into overlapping fixed-size windows

pub mod normalizer;
pub mod segmenter;
pub mod window;

pub use normalizer::{NormalizerConfig, TextNormalizer};
pub use segmenter::SentenceSegmenter;
pub use window::{count_windows, windows, SlidingWindow};
