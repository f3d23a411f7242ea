use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that may occur when loading a solver dump.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The dump does not exist at the given path.
    #[error("{} does not exist", path.display())]
    FileNotFound { path: PathBuf },

    /// The dump exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    /// The path does not carry the extension of the requested format.
    #[error("{} is not a .{expected} file", path.display())]
    WrongExtension {
        path: PathBuf,
        expected: &'static str,
    },

    /// A line could not be read according to the format.
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// Every line was readable, but the columns do not describe a consistent table.
    #[error("inconsistent dump: {0}")]
    Inconsistent(String),
}

impl ParseError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            reason: reason.into(),
        }
    }
}
