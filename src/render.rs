/// Documents built from templates, and where they are written
pub mod document;
/// Backend independent descriptions of what gets drawn
pub mod figure;
/// Interactive drawing surfaces
pub mod surface;
/// Placeholder substitution in text templates
pub mod template;

pub use document::DocumentWriter;
pub use figure::{Curve, CurveRole, Figure};
pub use surface::{Surface, SvgSurface};
pub use template::{Placeholder, Template};

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// How the parsed and derived series are turned into output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Draw figures and wait for the user to dismiss them
    Interactive,
    /// Substitute the series into a template and write a document
    Document,
}

/// Errors that may occur while drawing figures or writing documents.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot draw {}: {reason}", path.display())]
    Draw { path: PathBuf, reason: String },

    #[error("cannot read template {}: {source}", path.display())]
    Template { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    /// Waiting on the display failed for a reason other than an interruption.
    #[error("cannot wait for the display: {0}")]
    Display(io::Error),

    /// The user interrupted the wait on the display.
    #[error("display interrupted")]
    Interrupted,
}
