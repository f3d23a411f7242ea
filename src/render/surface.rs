use super::figure::{CurveRole, Figure, LogLogFigure, MeshFigure, ScatterFigure, WireframeFigure};
use super::RenderError;

use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error as StdError;
use std::fs;
use std::io::{self, BufRead, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

type DrawResult = Result<(), Box<dyn StdError>>;

/// Somewhere figures can be drawn and then shown to the user
pub trait Surface {
    fn draw(&mut self, figure: &Figure) -> Result<(), RenderError>;

    /// Present everything drawn so far, blocking until the user dismisses it.
    ///
    /// Returns [RenderError::Interrupted] if the user interrupts the wait.
    fn show(&mut self) -> Result<(), RenderError>;
}

/// Draws each figure to its own SVG file
///
/// Files are named `{stem}_{figure}.svg`. Showing lists the files and waits for Enter on stdin, or for Ctrl-C.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    dir: PathBuf,
    stem: String,
    size: (u32, u32),
    drawn: Vec<PathBuf>,
    wait: bool,
}

impl SvgSurface {
    pub fn new(dir: impl Into<PathBuf>, stem: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            stem: stem.into(),
            size: (900, 700),
            drawn: Vec::new(),
            wait: true,
        }
    }

    /// Don't block in [Surface::show]
    pub fn without_wait(mut self) -> Self {
        self.wait = false;
        self
    }

    /// Files drawn so far
    pub fn drawn(&self) -> &[PathBuf] {
        &self.drawn
    }
}

impl Surface for SvgSurface {
    fn draw(&mut self, figure: &Figure) -> Result<(), RenderError> {
        fs::create_dir_all(&self.dir).map_err(|source| RenderError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.dir.join(format!("{}_{}.svg", self.stem, figure.name()));
        draw_figure(&path, self.size, figure).map_err(|err| RenderError::Draw {
            path: path.clone(),
            reason: err.to_string(),
        })?;

        tracing::info!(path = %path.display(), "figure drawn");
        self.drawn.push(path);
        Ok(())
    }

    fn show(&mut self) -> Result<(), RenderError> {
        if self.drawn.is_empty() {
            return Ok(());
        }

        let stdout = io::stdout();
        let mut out = stdout.lock();
        for path in self.drawn.iter() {
            writeln!(out, "Figure: {}", path.display()).map_err(RenderError::Display)?;
        }

        if !self.wait {
            return Ok(());
        }

        write!(out, "Press Enter to close.").map_err(RenderError::Display)?;
        out.flush().map_err(RenderError::Display)?;
        drop(out);

        // whichever comes first: a line on stdin or SIGINT
        let (tx, rx) = mpsc::channel();
        let interrupt = tx.clone();
        ctrlc::set_handler(move || {
            let _ = interrupt.send(Err(RenderError::Interrupted));
        })
        .map_err(|err| RenderError::Display(io::Error::new(io::ErrorKind::Other, err)))?;

        thread::spawn(move || {
            let _ = tx.send(wait_for_dismissal(&mut io::stdin().lock()));
        });

        let dismissal = rx.recv().unwrap_or(Err(RenderError::Interrupted));
        if matches!(dismissal, Err(RenderError::Interrupted)) {
            println!();
        }
        dismissal
    }
}

/// Block until a line is read.
///
/// End of input counts as the user interrupting the display.
pub fn wait_for_dismissal(input: &mut impl BufRead) -> Result<(), RenderError> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => Err(RenderError::Interrupted),
        Ok(_) => Ok(()),
        Err(err) => Err(RenderError::Display(err)),
    }
}

fn draw_figure(path: &Path, size: (u32, u32), figure: &Figure) -> DrawResult {
    match figure {
        Figure::LogLog(figure) => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_loglog(&root, figure)?;
            root.present()?;
        }
        Figure::Mesh(figure) => {
            let side = size.0.min(size.1);
            let root = SVGBackend::new(path, (side, side)).into_drawing_area();
            draw_mesh(&root, figure)?;
            root.present()?;
        }
        Figure::Wireframe(figure) => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_wireframes(&root, figure)?;
            root.present()?;
        }
        Figure::Scatter(figure) => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_scatter(&root, figure)?;
            root.present()?;
        }
    }

    Ok(())
}

fn curve_style(role: CurveRole) -> ShapeStyle {
    match role {
        CurveRole::Error => RGBColor(7, 54, 66).stroke_width(2),
        CurveRole::Space => RGBColor(220, 50, 47).stroke_width(1),
        CurveRole::Time => RGBColor(203, 75, 22).stroke_width(1),
        CurveRole::Combined => RGBColor(133, 153, 0).stroke_width(1),
    }
}

/// `[min, max)` widened by `pad` on each side, and by 0.5 if empty
fn padded(min: f64, max: f64, pad: f64) -> Range<f64> {
    if max > min {
        (min - pad * (max - min))..(max + pad * (max - min))
    } else {
        (min - 0.5)..(max + 0.5)
    }
}

fn draw_loglog(root: &DrawingArea<SVGBackend, Shift>, figure: &LogLogFigure) -> DrawResult {
    root.fill(&WHITE)?;

    let [min, max] = match figure.log_bounds() {
        Some(bounds) => bounds,
        None => {
            tracing::warn!(figure = figure.name, "nothing to draw on log-log axes");
            return Ok(());
        }
    };

    let mut chart = ChartBuilder::on(root)
        .caption(&figure.title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(
            ((min.0 / 1.5)..(max.0 * 1.5)).log_scale(),
            ((min.1 / 2.0)..(max.1 * 2.0)).log_scale(),
        )?;

    chart.configure_mesh().x_desc("DoFs").draw()?;

    for curve in figure.curves.iter() {
        let style = curve_style(curve.role);
        let points: Vec<(f64, f64)> = curve
            .points
            .iter()
            .copied()
            .filter(|(x, y)| *x > 0.0 && *y > 0.0)
            .collect();

        chart
            .draw_series(LineSeries::new(points, style))?
            .label(curve.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

fn draw_mesh(root: &DrawingArea<SVGBackend, Shift>, figure: &MeshFigure) -> DrawResult {
    root.fill(&WHITE)?;

    let [min, max] = match figure.bounds() {
        Some(bounds) => bounds,
        None => return Ok(()),
    };

    // equal aspect: both axes span the larger extent
    let half = 0.5 * (max.x - min.x).max(max.y - min.y);
    let (cx, cy) = (0.5 * (min.x + max.x), 0.5 * (min.y + max.y));

    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_2d(padded(cx - half, cx + half, 0.05), padded(cy - half, cy + half, 0.05))?;

    chart.configure_mesh().disable_mesh().draw()?;

    let edges = RGBColor(7, 54, 66);
    for path in figure.paths.iter() {
        let points: Vec<(f64, f64)> = path.iter().map(|p| (p.x, p.y)).collect();
        chart.draw_series(std::iter::once(Polygon::new(points.clone(), WHITE.filled())))?;
        chart.draw_series(std::iter::once(PathElement::new(points, edges.stroke_width(1))))?;
    }

    Ok(())
}

/// Plotters draws its second axis upwards, so time goes there
fn draw_wireframes(root: &DrawingArea<SVGBackend, Shift>, figure: &WireframeFigure) -> DrawResult {
    root.fill(&WHITE)?;

    let [min, max] = match figure.bounds() {
        Some(bounds) => bounds,
        None => return Ok(()),
    };

    let mut chart = ChartBuilder::on(root).margin(20).build_cartesian_3d(
        padded(min.x, max.x, 0.05),
        padded(min.z, max.z, 0.05),
        padded(min.y, max.y, 0.05),
    )?;
    chart.with_projection(|mut projection| {
        projection.yaw = 0.6;
        projection.pitch = 0.3;
        projection.scale = 0.85;
        projection.into_matrix()
    });
    chart.configure_axes().draw()?;

    let edges = RGBColor(7, 54, 66);
    chart.draw_series(
        figure
            .wireframes
            .iter()
            .flat_map(|wireframe| wireframe.polylines())
            .map(|line| {
                PathElement::new(
                    line.iter().map(|p| (p.x, p.z, p.y)).collect::<Vec<_>>(),
                    edges.stroke_width(1),
                )
            }),
    )?;

    Ok(())
}

fn draw_scatter(root: &DrawingArea<SVGBackend, Shift>, figure: &ScatterFigure) -> DrawResult {
    root.fill(&WHITE)?;

    let [min, max] = match figure.bounds() {
        Some(bounds) => bounds,
        None => return Ok(()),
    };

    let mut chart = ChartBuilder::on(root).margin(20).build_cartesian_3d(
        padded(min.x, max.x, 0.05),
        padded(min.z, max.z, 0.05),
        padded(min.y, max.y, 0.05),
    )?;
    chart.with_projection(|mut projection| {
        projection.yaw = 0.6;
        projection.pitch = 0.3;
        projection.scale = 0.85;
        projection.into_matrix()
    });
    chart.configure_axes().draw()?;

    chart.draw_series(figure.samples.iter().map(|sample| {
        // blue (low) to red (high)
        let level = figure.normalized(sample.value);
        let color = HSLColor((240.0 - 240.0 * level) / 360.0, 0.85, 0.45);
        Circle::new((sample.x, sample.t, sample.y), 3, color.filled())
    }))?;

    Ok(())
}
