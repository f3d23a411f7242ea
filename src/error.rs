use super::render::RenderError;

use convergence::ComparisonError;
use dumps::ParseError;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Ways an invocation can end other than by completing normally.
#[derive(Debug, Error)]
pub enum Error {
    /// No input path was given.
    #[error("no input file given")]
    Usage,

    /// The input path does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Wrong extension, unreadable content, or a violated precondition of the input.
    #[error("Load a .{extension} file ({reason})")]
    Format {
        extension: &'static str,
        reason: String,
    },

    /// Drawing, template, or output failures.
    #[error("{0}")]
    Render(RenderError),

    /// The user dismissed the display before it was closed; not a failure.
    #[error("display interrupted")]
    DisplayInterrupted,
}

impl Error {
    /// Classify a loading error of a `.{extension}` dump
    pub fn load(extension: &'static str, err: ParseError) -> Self {
        match err {
            ParseError::FileNotFound { path } => Self::FileNotFound { path },
            other => Self::Format {
                extension,
                reason: other.to_string(),
            },
        }
    }

    /// Reference curves that cannot be built point at an input which doesn't meet the minimum schema
    pub fn comparison(extension: &'static str, err: ComparisonError) -> Self {
        Self::Format {
            extension,
            reason: err.to_string(),
        }
    }

    /// Whether the invocation should report a failure
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Usage | Self::DisplayInterrupted)
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Usage | Self::DisplayInterrupted => ExitCode::SUCCESS,
            Self::FileNotFound { .. } => ExitCode::from(2),
            Self::Format { .. } => ExitCode::from(3),
            Self::Render(_) => ExitCode::from(4),
        }
    }
}

impl From<RenderError> for Error {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Interrupted => Self::DisplayInterrupted,
            other => Self::Render(other),
        }
    }
}
