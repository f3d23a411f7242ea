use clap::Parser;
use fem_viz::cli::{self, DisplayArgs, DocumentArgs};
use fem_viz::render::document::{mesh_document, mesh_file_name};
use fem_viz::render::figure::MeshFigure;
use fem_viz::{Dump, Error, Figure, Mode, SpaceDiagram, Surface, Template};
use std::path::PathBuf;
use std::process::ExitCode;

const BINARY: &str = "poly2";

/// Cells of a space diagram
#[derive(Debug, Parser)]
#[command(name = BINARY, version, long_about = None)]
struct Cli {
    /// Space diagram (.p2)
    input: Option<PathBuf>,

    #[command(flatten)]
    document: DocumentArgs,

    #[command(flatten)]
    display: DisplayArgs,
}

fn run(cli: Cli) -> Result<(), Error> {
    let input = cli::input(cli.input.clone())?;
    let diagram: SpaceDiagram = cli::load(&input)?;
    tracing::info!(cells = diagram.cells.len(), skipped = diagram.skipped, "space diagram loaded");

    let degenerate = diagram.degenerate_cells();
    if degenerate > 0 {
        tracing::warn!(degenerate, "some cells have no area");
    }

    match cli.document.mode() {
        Mode::Document => {
            let template = cli.document.template(Template::mesh)?;
            let document = mesh_document(&template, &diagram);
            cli.document.writer().write(&mesh_file_name(&diagram), &document)?;
        }
        Mode::Interactive => {
            let mut surface = cli.display.surface(&input);
            surface.draw(&Figure::Mesh(MeshFigure::new(&diagram)))?;
            surface.show()?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_tracing(cli.display.verbose);

    cli::finish(BINARY, SpaceDiagram::EXTENSION, run(cli))
}
