use super::{data_lines, Dump, ParseError};

use geometry::{Point2, Polygon};

/// Lines starting with this marker are comments
pub const COMMENT_MARKER: char = '@';

/// The cells of a space diagram, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceDiagram {
    pub cells: Vec<Polygon>,
    /// Number of data lines which held no readable vertex
    pub skipped: usize,
}

impl SpaceDiagram {
    /// Number of cells with no area (fewer than three vertices, or collinear ones)
    pub fn degenerate_cells(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_degenerate()).count()
    }
}

impl Dump for SpaceDiagram {
    const EXTENSION: &'static str = "p2";

    /// Each line holds space separated `x y t` triples (`t` is ignored).
    ///
    /// Triples are read until the end of the line or the first unreadable one.
    /// Lines without any readable triple are skipped rather than reported.
    fn parse(contents: &str) -> Result<Self, ParseError> {
        let mut cells = Vec::new();
        let mut skipped = 0;

        for (line_number, line) in data_lines(contents) {
            if line.starts_with(COMMENT_MARKER) {
                continue;
            }

            let cell = read_cell(line);
            if cell.is_empty() {
                tracing::debug!(line = line_number, "skipping space diagram line without vertices");
                skipped += 1;
            } else {
                cells.push(cell);
            }
        }

        if skipped > 0 {
            tracing::warn!(skipped, "some space diagram lines were unreadable");
        }

        Ok(Self { cells, skipped })
    }
}

fn read_cell(line: &str) -> Polygon {
    let tokens: Vec<&str> = line.split(' ').collect();

    Polygon::new(
        (0..tokens.len().saturating_sub(1))
            .step_by(3)
            .map_while(|index| {
                let x = tokens[index].parse::<f64>().ok()?;
                let y = tokens[index + 1].parse::<f64>().ok()?;
                Some(Point2::new(x, y))
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_diagram_from_file() {
        let diagram = SpaceDiagram::from_file("./test_input/Square_4.p2").unwrap();

        assert_eq!(diagram.cells.len(), 4);
        assert_eq!(diagram.skipped, 0);
        for cell in diagram.cells.iter() {
            assert_eq!(cell.len(), 4);
        }
        assert_eq!(diagram.cells[3].vertices()[2], Point2::new(0.5, 1.0));
        assert_eq!(diagram.degenerate_cells(), 0);
    }

    #[test]
    fn unreadable_lines_are_skipped() {
        let diagram = SpaceDiagram::from_file("./test_input/Malformed.p2").unwrap();

        assert_eq!(diagram.cells.len(), 3);
        assert_eq!(diagram.skipped, 1);

        // reading stops at the first unreadable triple
        assert_eq!(diagram.cells[1].len(), 3);
        assert_eq!(diagram.cells[2].vertices()[0], Point2::new(1.0, 1.0));
    }

    #[test]
    fn trailing_pair_without_time() {
        let diagram = SpaceDiagram::parse("0 0 0 1 0").unwrap();
        assert_eq!(diagram.cells[0].len(), 2);
        assert_eq!(diagram.degenerate_cells(), 1);
    }

    #[test]
    fn collinear_cells_are_degenerate() {
        let diagram = SpaceDiagram::parse("0 0 0 1 0 0 0 1 0 0
0 0 0 1 1 0 2 2 0
").unwrap();

        assert_eq!(diagram.cells.len(), 2);
        assert_eq!(diagram.degenerate_cells(), 1);
    }

    #[test]
    fn wrong_extension() {
        assert!(matches!(
            SpaceDiagram::from_file("./test_input/Test_Mesh21.p21"),
            Err(ParseError::WrongExtension { expected: "p2", .. })
        ));
    }
}
