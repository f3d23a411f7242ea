/// Error-norm reports (`.e21`): one block of `key: value` lines per refinement test
pub mod e21;
/// Errors raised while loading dumps
pub mod error;
/// Space diagrams (`.p2`): one polygon per line
pub mod p2;
/// Space-time meshes (`.p21`): one extruded polygon per line
pub mod p21;
/// Pointwise solution samples (`.s21`): one `x,y,t,value` sample per line
pub mod s21;

pub use e21::{ConvergenceRecord, ConvergenceTable, NominalOrders, Norm};
pub use error::ParseError;
pub use p2::SpaceDiagram;
pub use p21::SpaceTimeMesh;
pub use s21::{SolutionSamples, Sample};

use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::Path;

/// A line-oriented text dump produced by the solver
pub trait Dump: Sized {
    /// Extension (without the dot) that files of this format must carry
    const EXTENSION: &'static str;

    /// Parse the full text content of a dump
    fn parse(contents: &str) -> Result<Self, ParseError>;

    /// Load and parse a dump file, rejecting paths which don't end in [Dump::EXTENSION]
    fn from_file(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let contents = read_dump(path, Self::EXTENSION)?;
        Self::parse(&contents)
    }
}

/// Read the content of a dump after checking that its extension is `extension`
///
/// The extension is checked before the file is opened, so a missing file with the wrong extension reports the extension.
pub fn read_dump(path: impl AsRef<Path>, extension: &'static str) -> Result<String, ParseError> {
    let path = path.as_ref();

    if path.extension().and_then(|ext| ext.to_str()) != Some(extension) {
        return Err(ParseError::WrongExtension {
            path: path.to_path_buf(),
            expected: extension,
        });
    }

    read_to_string(path).map_err(|err| match err.kind() {
        ErrorKind::NotFound => ParseError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => ParseError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    })
}

/// Non-blank lines of a dump along with their (1-based) line numbers
pub(crate) fn data_lines(contents: &str) -> impl Iterator<Item = (usize, &str)> + '_ {
    contents
        .split('\n')
        .enumerate()
        .map(|(index, line)| (index + 1, line.strip_suffix('\r').unwrap_or(line)))
        .filter(|(_, line)| !line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_checked_first() {
        match read_dump("./test_input/does_not_exist.p2", "e21") {
            Err(ParseError::WrongExtension { expected, .. }) => assert_eq!(expected, "e21"),
            other => panic!("expected a WrongExtension error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_distinguished() {
        match read_dump("./test_input/does_not_exist.e21", "e21") {
            Err(ParseError::FileNotFound { path }) => {
                assert!(path.ends_with("does_not_exist.e21"))
            }
            other => panic!("expected a FileNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn reads_existing_dump() {
        let contents = read_dump("./test_input/thConvergence_1_1.e21", "e21").unwrap();
        assert!(contents.contains("DoFs:"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let lines: Vec<(usize, &str)> = data_lines("a\n\n  \r\nb\r\n").collect();
        assert_eq!(lines, vec![(1, "a"), (4, "b")]);
    }
}
