use super::{data_lines, Dump, ParseError};

use geometry::{Point3, Prism};

/// The space-time cells of a mesh, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceTimeMesh {
    pub prisms: Vec<Prism>,
    /// Number of data lines which could not be read as a cell
    pub skipped: usize,
}

impl Dump for SpaceTimeMesh {
    const EXTENSION: &'static str = "p21";

    /// Each line holds comma separated `x,y,t` triples for the base ring followed by the height of the cell.
    ///
    /// A line with any unreadable value is skipped as a whole.
    fn parse(contents: &str) -> Result<Self, ParseError> {
        let mut prisms = Vec::new();
        let mut skipped = 0;

        for (line_number, line) in data_lines(contents) {
            match read_prism(line) {
                Some(prism) => prisms.push(prism),
                None => {
                    tracing::debug!(line = line_number, "skipping unreadable space-time cell");
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, "some space-time cells were unreadable");
        }

        Ok(Self { prisms, skipped })
    }
}

fn read_prism(line: &str) -> Option<Prism> {
    let tokens: Vec<f64> = line
        .split(',')
        .map(|token| token.trim().parse::<f64>().ok())
        .collect::<Option<Vec<f64>>>()?;

    let (height, base) = tokens.split_last()?;
    if base.is_empty() || base.len() % 3 != 0 {
        return None;
    }

    Some(Prism::new(
        base.chunks_exact(3)
            .map(|triple| Point3::new(triple[0], triple[1], triple[2])),
        *height,
    ))
}
