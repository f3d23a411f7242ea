use super::template::{self, coordinates, Template};
use super::RenderError;

use convergence::{ComparisonError, Quantity, ReferenceCurves};
use dumps::{ConvergenceTable, Norm, SpaceDiagram};
use geometry::Polygon;
use nalgebra::DVector;
use std::fs;
use std::path::{Path, PathBuf};

/// Path fragments marking saturation studies, and the marker each adds to output names
const SATURATION_MARKERS: [(&str, &str); 2] = [("tSaturation", "t_sat_"), ("hSaturation", "h_sat_")];

/// `"par"` if any value of the `√ε L²(H¹)` series is strictly positive, `"hyp"` otherwise
///
/// A report without that series describes a problem without diffusion.
pub fn classification(l2h1: Option<&DVector<f64>>) -> &'static str {
    match l2h1 {
        Some(series) if series.iter().any(|value| *value > 0.0) => "par",
        _ => "hyp",
    }
}

/// Markers of the saturation studies named in the input path
pub fn saturation_markers(input: &Path) -> String {
    let input = input.to_string_lossy();

    SATURATION_MARKERS
        .iter()
        .filter(|(fragment, _)| input.contains(fragment))
        .map(|(_, marker)| *marker)
        .collect()
}

/// `{p}_{q}_{par|hyp}_[t_sat_][h_sat_]{quantity}.tex`
pub fn convergence_file_name(table: &ConvergenceTable, quantity: &Quantity, input: &Path) -> String {
    let orders = table.nominal_orders();

    format!(
        "{}_{}_{}_{}{}.tex",
        orders.p,
        orders.q,
        classification(table.error(Norm::L2H1)),
        saturation_markers(input),
        quantity.name
    )
}

/// Substitute an error series, its reference curves and their labels into a log-log template
///
/// When the combined curve is withheld, the template lines holding its series and label are left out.
pub fn convergence_document(
    template: &Template,
    table: &ConvergenceTable,
    quantity: &Quantity,
    curves: &ReferenceCurves,
) -> Result<String, ComparisonError> {
    let errors = table
        .error(quantity.norm)
        .ok_or(ComparisonError::MissingQuantity {
            key: quantity.norm.key(),
        })?;
    let orders = quantity.expected_orders(table.nominal_orders());
    let series = |values: &DVector<f64>| coordinates(table.dofs().iter().zip(values.iter()));

    let error = series(errors);
    let space = series(&curves.space);
    let time = series(&curves.time);
    let space_label = orders.space_label();
    let time_label = orders.time_label("\\tau");
    let (layout, combined, combined_label) = match &curves.combined {
        Some(values) => (template.clone(), series(values), orders.combined_label("\\tau")),
        None => (
            template.without(&[template::HT_COMPARISON, template::LHPTQ]),
            String::new(),
            String::new(),
        ),
    };

    Ok(layout.substitute([
        (template::ERROR, error.as_str()),
        (template::H_COMPARISON, space.as_str()),
        (template::T_COMPARISON, time.as_str()),
        (template::HT_COMPARISON, combined.as_str()),
        (template::LHP, space_label.as_str()),
        (template::LTQ, time_label.as_str()),
        (template::LHPTQ, combined_label.as_str()),
        (template::LERROR, quantity.latex),
    ]))
}

/// `\t\t{(x0,y0)--(x1,y1)--...}`
fn tikz_path(polygon: &Polygon) -> String {
    let vertices: Vec<String> = polygon
        .vertices()
        .iter()
        .map(|vertex| format!("({},{})", vertex.x, vertex.y))
        .collect();

    format!("\t\t{{{}}}", vertices.join("--"))
}

/// Substitute the cells of a space diagram into a mesh template, one TikZ path per cell
///
/// Empty cells are left out.
pub fn mesh_document(template: &Template, diagram: &SpaceDiagram) -> String {
    let paths: Vec<String> = drawable_cells(diagram).map(tikz_path).collect();
    template.substitute([(template::POLYGONS, paths.join(",\n").as_str())])
}

/// `mesh_{cells}.tex`
pub fn mesh_file_name(diagram: &SpaceDiagram) -> String {
    format!("mesh_{}.tex", drawable_cells(diagram).count())
}

fn drawable_cells(diagram: &SpaceDiagram) -> impl Iterator<Item = &Polygon> + '_ {
    diagram.cells.iter().filter(|cell| !cell.is_empty())
}

/// Writes documents into an output directory
#[derive(Debug, Clone)]
pub struct DocumentWriter {
    dir: PathBuf,
}

impl DocumentWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `contents` to `name` in the output directory, creating the directory if needed.
    ///
    /// An existing file at that path is overwritten.
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf, RenderError> {
        fs::create_dir_all(&self.dir).map_err(|source| RenderError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(name);
        fs::write(&path, contents).map_err(|source| RenderError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::info!(path = %path.display(), "document written");
        Ok(path)
    }
}
