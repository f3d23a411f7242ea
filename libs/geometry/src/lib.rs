/// Cells of a space diagram, as dumped in `.p2` files
pub mod polygon;
/// Space-time cells: a (possibly non-planar) base ring extruded along the time axis
pub mod prism;

pub use nalgebra::{Point2, Point3};
pub use polygon::Polygon;
pub use prism::{Prism, Wireframe};

/// Expected number of vertices in a cell. This determines the stack allocation size of vertex rings
pub const EXPECTED_RING_SIZE: usize = 8;

/// Axis aligned bounds (`[min, max]`) of a set of 2D points. `None` if there are no points.
pub fn bounds_2d<'a>(points: impl IntoIterator<Item = &'a Point2<f64>>) -> Option<[Point2<f64>; 2]> {
    points.into_iter().fold(None, |acc, p| match acc {
        None => Some([*p, *p]),
        Some([min, max]) => Some([min.inf(p), max.sup(p)]),
    })
}

/// Axis aligned bounds (`[min, max]`) of a set of 3D points. `None` if there are no points.
pub fn bounds_3d<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<[Point3<f64>; 2]> {
    points.into_iter().fold(None, |acc, p| match acc {
        None => Some([*p, *p]),
        Some([min, max]) => Some([min.inf(p), max.sup(p)]),
    })
}
