//! Two-stage corpus preparation.
//!
//! **Clean**: TSV corpus → [`TextNormalizer`] → one normalized sentence per
//! line in the cleaned file.
//!
//! **Group**: cleaned file → [`SentenceSegmenter`] → [`SlidingWindow`] → one
//! space-joined window per line in the groups file.
//!
//! Each stage holds its whole input in memory. Row-level problems are logged
//! and skipped; file-level problems end the stage with a [`PipelineError`].

use std::io::BufRead;

use tracing::{debug, info, warn};

use crate::analyzer::{SentenceSegmenter, SlidingWindow, TextNormalizer};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::sink::write_lines;
use crate::source::{read_cleaned_lines, TsvSource};

/// Outcome of the clean stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Data rows read, header excluded.
    pub rows: usize,
    /// Normalized sentences written.
    pub kept: usize,
    /// Rows with too few columns or an empty text field.
    pub malformed: usize,
    /// Rows that failed while being processed.
    pub failed: usize,
    /// Rows whose text normalized to nothing.
    pub emptied: usize,
    /// The first few normalized sentences.
    pub preview: Vec<String>,
}

impl CleanReport {
    /// Rows that produced no output, for any reason.
    pub fn skipped(&self) -> usize {
        self.malformed + self.failed + self.emptied
    }
}

/// Outcome of the group stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupReport {
    /// Non-blank lines read from the cleaned file.
    pub lines: usize,
    /// Sentences found across those lines.
    pub sentences: usize,
    /// Windows written.
    pub windows: usize,
    /// The first few rendered windows.
    pub preview: Vec<String>,
}

impl GroupReport {
    /// `true` when the cleaned file held no text and nothing was written.
    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }
}

/// Normalized sentences produced from a source, plus the tally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cleaned {
    /// One normalized, non-empty sentence per kept row.
    pub sentences: Vec<String>,
    pub report: CleanReport,
}

/// Windows rendered from cleaned lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouped {
    /// Sentences found across the lines.
    pub sentences: usize,
    /// Each window, sentences joined by a space.
    pub windows: Vec<String>,
}

/// Drives both stages with one configuration.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    normalizer: TextNormalizer,
    segmenter: SentenceSegmenter,
    windower: SlidingWindow,
}

impl Pipeline {
    /// Builds a pipeline after validating `config`.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            windower: SlidingWindow::new(config.window),
            normalizer: TextNormalizer::default(),
            segmenter: SentenceSegmenter::default(),
            config,
        })
    }

    /// Settings this pipeline runs with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Normalizes every usable row of `source`.
    pub fn clean_source<R: BufRead>(&self, source: TsvSource<R>) -> Result<Cleaned> {
        let mut cleaned = Cleaned::default();
        let mut buf = String::new();

        let rows = source.read_each(|row| {
            let report = &mut cleaned.report;
            match row {
                Ok(record) => {
                    self.normalizer.normalize_into(&record.text, &mut buf);
                    if buf.is_empty() {
                        debug!("line {}: text normalized to nothing, skipping", record.line);
                        report.emptied += 1;
                    } else {
                        cleaned.sentences.push(buf.clone());
                    }
                }
                Err(e) if e.is_malformed() => {
                    debug!("skipping malformed row: {}", e);
                    report.malformed += 1;
                }
                Err(e) => {
                    warn!("error processing {}", e);
                    report.failed += 1;
                }
            }
        })?;

        cleaned.report.rows = rows;
        cleaned.report.kept = cleaned.sentences.len();
        cleaned.report.preview = preview(&cleaned.sentences, self.config.preview);
        Ok(cleaned)
    }

    /// Clean stage: reads the TSV input and writes the cleaned file.
    ///
    /// A missing input fails before the output file is touched.
    pub fn clean(&self) -> Result<CleanReport> {
        let input = &self.config.input;
        info!("Cleaning {}", input.display());

        let source = TsvSource::open(input, self.config.text_column)?;
        let Cleaned { sentences, report } = self.clean_source(source)?;

        write_lines(&self.config.cleaned_output, &sentences)?;

        info!(
            "Processed {} rows: kept {}, skipped {} ({} malformed, {} failed, {} empty)",
            report.rows,
            report.kept,
            report.skipped(),
            report.malformed,
            report.failed,
            report.emptied
        );
        info!("Cleaned text saved to {}", self.config.cleaned_output.display());
        Ok(report)
    }

    /// Segments `lines` and renders every window, in order.
    pub fn group_lines<S: AsRef<str>>(&self, lines: &[S]) -> Grouped {
        let sentences = self.segmenter.segment(lines);
        let windows = self
            .windower
            .windows(&sentences)
            .map(|w| w.to_string())
            .collect();
        Grouped {
            sentences: sentences.len(),
            windows,
        }
    }

    /// Group stage: reads the cleaned file and writes the groups file.
    ///
    /// An empty cleaned file is not an error; nothing is written and the
    /// report says so.
    pub fn group(&self) -> Result<GroupReport> {
        let cleaned = &self.config.cleaned_output;
        info!("Reading cleaned text from {}", cleaned.display());

        let lines = read_cleaned_lines(cleaned)?;
        if lines.is_empty() {
            warn!("No text found in {}", cleaned.display());
            return Ok(GroupReport::default());
        }

        let grouped = self.group_lines(&lines);
        info!("Found {} sentences in {} lines", grouped.sentences, lines.len());

        let written = write_lines(&self.config.groups_output, &grouped.windows)?;
        debug_assert_eq!(written, self.windower.count(grouped.sentences));

        let report = GroupReport {
            lines: lines.len(),
            sentences: grouped.sentences,
            windows: written,
            preview: preview(&grouped.windows, self.config.group_preview),
        };

        info!(
            "Saved {} groups of {} to {}",
            report.windows,
            self.windower.group_size(),
            self.config.groups_output.display()
        );
        Ok(report)
    }

    /// Runs clean then group.
    pub fn run(&self) -> Result<(CleanReport, GroupReport)> {
        let clean = self.clean()?;
        let group = self.group()?;
        Ok((clean, group))
    }
}

impl TryFrom<PipelineConfig> for Pipeline {
    type Error = PipelineError;

    fn try_from(config: PipelineConfig) -> Result<Self> {
        Pipeline::new(config)
    }
}

fn preview(items: &[String], n: usize) -> Vec<String> {
    items.iter().take(n).cloned().collect()
}
