//! File-level errors of the pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// File-level failures that end a pipeline run.
///
/// Row-level problems never surface here; they are
/// [`RecordError`](urdu_prep_types::RecordError)s, logged and skipped.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An input file (the TSV corpus or the cleaned text) does not exist.
    #[error("input file '{}' not found", path.display())]
    MissingSource { path: PathBuf },
    /// Reading or writing `path` failed.
    #[error("{context} '{}': {source}", path.display())]
    Io {
        /// What was being attempted, e.g. `"failed to read"`.
        context: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Settings that no run could honour.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        PipelineError::Io {
            context,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
