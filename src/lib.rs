extern crate convergence;
extern crate dumps;
extern crate geometry;

/// Arguments, logging, and exit status shared by the binaries
pub mod cli;
/// Error taxonomy of an invocation
pub mod error;
/// JSON summaries of error reports
#[cfg(feature = "json_export")]
pub mod export;
/// Interactive figures and templated documents
pub mod render;

pub use convergence::{observed_orders, Quantity, ReferenceCurves, QUANTITIES};
pub use dumps::{ConvergenceTable, Dump, SolutionSamples, SpaceDiagram, SpaceTimeMesh};
pub use error::Error;
pub use render::{Figure, Mode, RenderError, Surface, SvgSurface, Template};
