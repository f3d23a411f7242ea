use super::{bounds_3d, EXPECTED_RING_SIZE};

use nalgebra::Point3;
use smallvec::SmallVec;

/// A space-time cell: a base ring of `(x, y, t)` vertices extruded by `height` along the t axis.
///
/// Every base vertex carries its own elevation, so the base does not need to be planar.
/// ```text
///     u0 ------- u1          upper ring: (x, y, t + height)
///     |          |
///     |          |           one vertical edge per base vertex
///     |          |
///     l0 ------- l1          lower ring: (x, y, t)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Prism {
    base: SmallVec<[Point3<f64>; EXPECTED_RING_SIZE]>,
    height: f64,
}

impl Prism {
    pub fn new(base: impl IntoIterator<Item = Point3<f64>>, height: f64) -> Self {
        Self {
            base: base.into_iter().collect(),
            height,
        }
    }

    pub fn base(&self) -> &[Point3<f64>] {
        &self.base
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The base ring, closed by a copy of its first vertex
    pub fn lower_ring(&self) -> Vec<Point3<f64>> {
        close_ring(self.base.iter().copied())
    }

    /// The base ring lifted by `height`, closed by a copy of its first vertex
    pub fn upper_ring(&self) -> Vec<Point3<f64>> {
        close_ring(self.base.iter().map(|p| self.lift(p)))
    }

    /// One `[lower, upper]` segment per base vertex (the closing copy does not get its own edge)
    pub fn vertical_edges(&self) -> Vec<[Point3<f64>; 2]> {
        self.base.iter().map(|p| [*p, self.lift(p)]).collect()
    }

    pub fn wireframe(&self) -> Wireframe {
        Wireframe {
            lower: self.lower_ring(),
            upper: self.upper_ring(),
            verticals: self.vertical_edges(),
        }
    }

    fn lift(&self, p: &Point3<f64>) -> Point3<f64> {
        Point3::new(p.x, p.y, p.z + self.height)
    }
}

fn close_ring(points: impl Iterator<Item = Point3<f64>>) -> Vec<Point3<f64>> {
    let mut ring: Vec<Point3<f64>> = points.collect();
    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }
    ring
}

/// Edge-only description of a [Prism]: two closed rings and the vertical segments joining them
#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    pub lower: Vec<Point3<f64>>,
    pub upper: Vec<Point3<f64>>,
    pub verticals: Vec<[Point3<f64>; 2]>,
}

impl Wireframe {
    /// Every polyline of the wireframe: the lower ring, the upper ring, then each vertical segment
    pub fn polylines(&self) -> impl Iterator<Item = &[Point3<f64>]> + '_ {
        [self.lower.as_slice(), self.upper.as_slice()]
            .into_iter()
            .chain(self.verticals.iter().map(|segment| segment.as_slice()))
    }

    pub fn bounds(&self) -> Option<[Point3<f64>; 2]> {
        bounds_3d(self.lower.iter().chain(self.upper.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_cube_base() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn square_prism_wireframe() {
        let wireframe = Prism::new(unit_cube_base(), 2.0).wireframe();

        assert_eq!(wireframe.lower.len(), 5);
        assert_eq!(wireframe.lower[4], Point3::new(0.0, 0.0, 0.0));

        assert_eq!(wireframe.upper.len(), 5);
        for (lower, upper) in wireframe.lower.iter().zip(wireframe.upper.iter()) {
            assert_eq!(lower.x, upper.x);
            assert_eq!(lower.y, upper.y);
            assert_relative_eq!(upper.z, 2.0);
        }

        assert_eq!(wireframe.verticals.len(), 4);
        for [bottom, top] in wireframe.verticals.iter() {
            assert_relative_eq!((top - bottom).norm(), 2.0);
        }

        assert_eq!(wireframe.polylines().count(), 6);
    }

    #[test]
    fn non_planar_base_keeps_vertex_elevations() {
        let prism = Prism::new(
            [
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.25),
                Point3::new(0.0, 1.0, 0.5),
            ],
            0.5,
        );

        let upper = prism.upper_ring();
        assert_relative_eq!(upper[0].z, 0.5);
        assert_relative_eq!(upper[1].z, 0.75);
        assert_relative_eq!(upper[2].z, 1.0);
        assert_relative_eq!(upper[3].z, 0.5);

        let [min, max] = prism.wireframe().bounds().unwrap();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn single_vertex_prism() {
        let wireframe = Prism::new([Point3::new(0.5, 0.5, 0.0)], 1.0).wireframe();

        assert_eq!(wireframe.lower, vec![Point3::new(0.5, 0.5, 0.0); 2]);
        assert_eq!(wireframe.upper, vec![Point3::new(0.5, 0.5, 1.0); 2]);
        assert_eq!(
            wireframe.verticals,
            vec![[Point3::new(0.5, 0.5, 0.0), Point3::new(0.5, 0.5, 1.0)]]
        );
    }
}
