use super::EXPECTED_RING_SIZE;

use nalgebra::Point2;
use smallvec::SmallVec;

/// A cell of a space diagram.
///
/// Vertices are kept in file order; the ring is closed implicitly (the last vertex connects back to the first).
/// Degenerate cells (fewer than three vertices, or zero area) are accepted as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: SmallVec<[Point2<f64>; EXPECTED_RING_SIZE]>,
}

impl Polygon {
    pub fn new(vertices: impl IntoIterator<Item = Point2<f64>>) -> Self {
        Self {
            vertices: vertices.into_iter().collect(),
        }
    }

    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The vertices followed by a copy of the first one, so a path drawn through them returns to its start
    pub fn closed_path(&self) -> Vec<Point2<f64>> {
        let mut path: Vec<Point2<f64>> = self.vertices.to_vec();
        if let Some(first) = self.vertices.first() {
            path.push(*first);
        }
        path
    }

    /// Signed area (shoelace formula); positive for counter-clockwise rings
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                let [a, b] = [self.vertices[i], self.vertices[(i + 1) % n]];
                a.x * b.y - b.x * a.y
            })
            .sum::<f64>()
            / 2.0
    }

    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3 || self.signed_area().abs() < f64::EPSILON
    }
}
