//! Urdu corpus preparation.
//!
//! Turns a raw Urdu TSV corpus into training text in two stages:
//!
//! - [`analyzer::normalizer`]: strips diacritics and joiners, unifies Alef and
//!   Yeh letterforms, and maps typographic punctuation to ASCII
//! - [`analyzer::segmenter`] and [`analyzer::window`]: split the cleaned text
//!   on the Urdu full stop and group sentences into overlapping windows
//!
//! [`pipeline::Pipeline`] wires the stages to the file readers in [`source`]
//! and the writer in [`sink`].

pub mod analyzer;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod sink;
pub mod source;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use pipeline::{CleanReport, GroupReport, Pipeline};
pub use urdu_prep_types as types;
