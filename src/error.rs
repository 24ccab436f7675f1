// src/error.rs

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the experiment logs or reducing their data.
///
/// Every variant is fatal for the analysis that raised it; the binary prints
/// the message and exits non-zero.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}:{line}: {reason}: '{text}'", .path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        text: String,
        reason: String,
    },

    #[error("{}:{line}: invalid reward entry '{entry}'", .path.display())]
    InvalidReward {
        path: PathBuf,
        line: usize,
        entry: String,
    },

    #[error("cannot fit a line to {found} point(s) for the {context}; at least 2 are needed")]
    InsufficientData { context: String, found: usize },

    #[error("cannot fit a line for the {context}: all {count} samples share time {time} ms")]
    DegenerateSeries {
        context: String,
        count: usize,
        time: u64,
    },

    #[error("reward run {run} has {found} episodes, expected {expected} (same as run 0)")]
    RaggedRuns {
        run: usize,
        expected: usize,
        found: usize,
    },

    #[error("no reward runs to reduce")]
    NoRuns,

    #[error("mean has {found} episodes but the runs have {expected}")]
    MeanLengthMismatch { expected: usize, found: usize },
}

impl AnalysisError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
