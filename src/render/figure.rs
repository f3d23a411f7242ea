use convergence::{ComparisonError, Quantity, ReferenceCurves};
use dumps::{ConvergenceTable, Sample, SolutionSamples, SpaceDiagram, SpaceTimeMesh};
use geometry::{bounds_2d, bounds_3d, Point2, Point3, Wireframe};

/// What a convergence curve stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveRole {
    /// The reported error series
    Error,
    /// `h^op` reference
    Space,
    /// `tau^oq` reference
    Time,
    /// `h^op + tau^oq` reference
    Combined,
}

/// A labelled series of `(DoFs, value)` points
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    pub role: CurveRole,
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// An error series against its reference curves, on log-log axes
#[derive(Debug, Clone, PartialEq)]
pub struct LogLogFigure {
    /// Name of the quantity
    pub name: &'static str,
    pub title: String,
    pub curves: Vec<Curve>,
}

impl LogLogFigure {
    pub fn for_quantity(
        table: &ConvergenceTable,
        quantity: &Quantity,
        curves: &ReferenceCurves,
    ) -> Result<Self, ComparisonError> {
        let errors = table
            .error(quantity.norm)
            .ok_or(ComparisonError::MissingQuantity {
                key: quantity.norm.key(),
            })?;

        let nominal = table.nominal_orders();
        let orders = quantity.expected_orders(nominal);
        let curve = |role, label: String, values: &nalgebra::DVector<f64>| Curve {
            role,
            label,
            points: table
                .dofs()
                .iter()
                .zip(values.iter())
                .map(|(dofs, value)| (*dofs as f64, *value))
                .collect(),
        };

        let mut figure_curves = vec![curve(CurveRole::Error, quantity.text.to_string(), errors)];
        if let Some(combined) = &curves.combined {
            figure_curves.push(curve(CurveRole::Combined, orders.combined_label("τ"), combined));
        }
        figure_curves.push(curve(CurveRole::Space, orders.space_label(), &curves.space));
        figure_curves.push(curve(CurveRole::Time, orders.time_label("τ"), &curves.time));

        Ok(Self {
            name: quantity.name,
            title: quantity.title(nominal),
            curves: figure_curves,
        })
    }

    /// `[min, max]` of the DoFs and of the values, over strictly positive points only
    pub fn log_bounds(&self) -> Option<[(f64, f64); 2]> {
        self.curves
            .iter()
            .flat_map(|curve| curve.points.iter())
            .filter(|(x, y)| *x > 0.0 && *y > 0.0)
            .fold(None, |acc, (x, y)| match acc {
                None => Some([(*x, *y), (*x, *y)]),
                Some([min, max]) => Some([(min.0.min(*x), min.1.min(*y)), (max.0.max(*x), max.1.max(*y))]),
            })
    }
}

/// The cells of a space diagram as closed 2D paths
#[derive(Debug, Clone, PartialEq)]
pub struct MeshFigure {
    pub paths: Vec<Vec<Point2<f64>>>,
}

impl MeshFigure {
    pub fn new(diagram: &SpaceDiagram) -> Self {
        Self {
            paths: diagram
                .cells
                .iter()
                .filter(|cell| !cell.is_empty())
                .map(|cell| cell.closed_path())
                .collect(),
        }
    }

    pub fn bounds(&self) -> Option<[Point2<f64>; 2]> {
        bounds_2d(self.paths.iter().flatten())
    }
}

/// The space-time cells of a mesh as prism wireframes
#[derive(Debug, Clone, PartialEq)]
pub struct WireframeFigure {
    pub wireframes: Vec<Wireframe>,
}

impl WireframeFigure {
    pub fn new(mesh: &SpaceTimeMesh) -> Self {
        Self {
            wireframes: mesh.prisms.iter().map(|prism| prism.wireframe()).collect(),
        }
    }

    pub fn bounds(&self) -> Option<[Point3<f64>; 2]> {
        bounds_3d(
            self.wireframes
                .iter()
                .flat_map(|wireframe| wireframe.lower.iter().chain(wireframe.upper.iter())),
        )
    }
}

/// Solution samples placed at `(x, y, t)` and coloured by value
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub samples: Vec<Sample>,
    /// `[min, max]` of the values
    pub range: Option<[f64; 2]>,
}

impl ScatterFigure {
    pub fn new(samples: &SolutionSamples) -> Self {
        Self {
            samples: samples.samples.clone(),
            range: samples.value_range(),
        }
    }

    /// Position of `value` within the value range, in `[0, 1]`
    pub fn normalized(&self, value: f64) -> f64 {
        match self.range {
            Some([min, max]) if max > min => ((value - min) / (max - min)).clamp(0.0, 1.0),
            _ => 0.5,
        }
    }

    pub fn bounds(&self) -> Option<[Point3<f64>; 2]> {
        let points: Vec<Point3<f64>> = self
            .samples
            .iter()
            .map(|sample| Point3::new(sample.x, sample.y, sample.t))
            .collect();
        bounds_3d(points.iter())
    }
}

/// Anything a surface can draw
#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    LogLog(LogLogFigure),
    Mesh(MeshFigure),
    Wireframe(WireframeFigure),
    Scatter(ScatterFigure),
}

impl Figure {
    /// Short name, unique among the figures of one invocation
    pub fn name(&self) -> &'static str {
        match self {
            Self::LogLog(figure) => figure.name,
            Self::Mesh(_) => "mesh",
            Self::Wireframe(_) => "wireframe",
            Self::Scatter(_) => "samples",
        }
    }
}
