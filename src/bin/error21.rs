use clap::Parser;
use fem_viz::cli::{self, DisplayArgs, DocumentArgs};
use fem_viz::render::document::{convergence_document, convergence_file_name};
use fem_viz::render::figure::LogLogFigure;
use fem_viz::{observed_orders, ConvergenceTable, Dump, Error, Figure, Mode, Quantity, ReferenceCurves};
use fem_viz::{Surface, Template};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const BINARY: &str = "error21";

/// Error norms of a convergence study against their expected rates
#[derive(Debug, Parser)]
#[command(name = BINARY, version, long_about = None)]
struct Cli {
    /// Error report (.e21)
    input: Option<PathBuf>,

    /// L²(L²) error
    #[arg(long)]
    l2l2: bool,

    /// L² error at the final time
    #[arg(long = "l2T")]
    l2t: bool,

    /// √ε L²(H¹) error
    #[arg(long)]
    l2h1: bool,

    /// L∞(L²) error
    #[arg(long)]
    linfl2: bool,

    /// Also export the report and its reference curves to <OUTPUT_DIR>/<name>.json
    #[cfg(feature = "json_export")]
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    document: DocumentArgs,

    #[command(flatten)]
    display: DisplayArgs,
}

impl Cli {
    fn quantities(&self) -> Vec<&'static Quantity> {
        [
            ("l2l2", self.l2l2),
            ("l2T", self.l2t),
            ("l2h1", self.l2h1),
            ("linfl2", self.linfl2),
        ]
        .into_iter()
        .filter(|(_, requested)| *requested)
        .filter_map(|(name, _)| Quantity::by_name(name))
        .collect()
    }
}

fn log_observed_orders(table: &ConvergenceTable, quantity: &Quantity) {
    if let Some(errors) = table.error(quantity.norm) {
        let join = |orders: Vec<Option<f64>>| {
            orders
                .into_iter()
                .map(|order| order.map_or_else(|| String::from("-"), |order| format!("{:.3}", order)))
                .collect::<Vec<_>>()
                .join(" ")
        };

        tracing::info!(
            quantity = quantity.name,
            space = %join(observed_orders(errors, table.h())),
            time = %join(observed_orders(errors, table.tau())),
            "observed orders"
        );
    }
}

fn write_documents(
    cli: &Cli,
    input: &Path,
    table: &ConvergenceTable,
    rendered: &[(&Quantity, ReferenceCurves)],
) -> Result<(), Error> {
    let template = cli.document.template(Template::loglog)?;
    let writer = cli.document.writer();

    for (quantity, curves) in rendered.iter() {
        let document = convergence_document(&template, table, quantity, curves)
            .map_err(|err| Error::comparison(ConvergenceTable::EXTENSION, err))?;
        writer.write(&convergence_file_name(table, quantity, input), &document)?;
    }

    Ok(())
}

fn draw_figures(
    cli: &Cli,
    input: &Path,
    table: &ConvergenceTable,
    rendered: &[(&Quantity, ReferenceCurves)],
) -> Result<(), Error> {
    let mut surface = cli.display.surface(input);

    for (quantity, curves) in rendered.iter() {
        let figure = LogLogFigure::for_quantity(table, quantity, curves)
            .map_err(|err| Error::comparison(ConvergenceTable::EXTENSION, err))?;
        surface.draw(&Figure::LogLog(figure))?;
    }

    Ok(surface.show()?)
}

fn run(cli: Cli) -> Result<(), Error> {
    let input = cli::input(cli.input.clone())?;
    let table: ConvergenceTable = cli::load(&input)?;
    tracing::info!(records = table.len(), "error report loaded");
    for record in table.records() {
        tracing::debug!(
            dofs = record.dofs,
            h = record.h,
            tau = record.tau,
            errors = ?record.errors.as_slice(),
            "refinement test"
        );
    }

    let quantities = cli.quantities();
    if quantities.is_empty() {
        tracing::warn!("no quantity requested; pass --l2l2, --l2T, --l2h1 or --linfl2");
        return Ok(());
    }

    let mut rendered = Vec::with_capacity(quantities.len());
    for quantity in quantities {
        let curves = ReferenceCurves::for_quantity(&table, quantity)
            .map_err(|err| Error::comparison(ConvergenceTable::EXTENSION, err))?;
        if curves.combined.is_none() {
            tracing::debug!(quantity = quantity.name, "combined reference curve withheld");
        }

        log_observed_orders(&table, quantity);
        rendered.push((quantity, curves));
    }

    #[cfg(feature = "json_export")]
    if cli.json {
        let report = fem_viz::export::report_to_json(&table, &rendered);
        let path = cli.document.output_dir.join(format!("{}.json", cli::file_stem(&input)));
        fem_viz::export::export_to_json(path, &report)?;
    }

    match cli.document.mode() {
        Mode::Document => write_documents(&cli, &input, &table, &rendered),
        Mode::Interactive => draw_figures(&cli, &input, &table, &rendered),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_tracing(cli.display.verbose);

    cli::finish(BINARY, ConvergenceTable::EXTENSION, run(cli))
}
