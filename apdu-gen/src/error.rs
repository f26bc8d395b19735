//! Error types for `apdu-gen`.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors surfaced by the `apdu-gen` pipeline.
///
/// Every variant is terminal for a generation run: nothing is written once
/// one of these has been raised.
#[derive(Debug, Error)]
pub enum GenError {
    /// A table row has fewer than three `;`-separated fields.
    #[error("malformed instruction table row {line_number}: {line:?} (expected `bytes; name; reference`)")]
    MalformedRow {
        /// One-based line number within the table text.
        line_number: usize,
        /// The offending row, trimmed of surrounding whitespace.
        line: String,
    },

    /// More than one destination argument was supplied.
    #[error("expected at most 1 destination argument, got {count}")]
    TooManyArguments {
        /// Number of positional arguments received.
        count: usize,
    },

    /// The destination does not name a file.
    #[error("destination '{0}' does not name a file")]
    InvalidDestination(Utf8PathBuf),

    /// Check mode was requested without a destination to compare against.
    #[error("--check requires a destination file")]
    CheckWithoutDestination,

    /// The destination differs from freshly generated output.
    #[error("{0} is out of date; rerun apdu-gen to regenerate it")]
    Stale(Utf8PathBuf),

    /// An explicitly requested configuration file does not exist.
    #[error("configuration file not found at {0}")]
    MissingConfig(Utf8PathBuf),

    /// Configuration layers could not be merged or extracted.
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Writing the generated document to standard output failed.
    #[error("failed to write to standard output: {0}")]
    Stdout(#[source] std::io::Error),

    /// Reading or writing a destination file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path involved in the failed operation.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl From<figment::Error> for GenError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}
