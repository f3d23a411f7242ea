use clap::Parser;
use fem_viz::cli::{self, DisplayArgs};
use fem_viz::render::figure::WireframeFigure;
use fem_viz::{Dump, Error, Figure, SpaceTimeMesh, Surface};
use std::path::PathBuf;
use std::process::ExitCode;

const BINARY: &str = "poly21";

/// Space-time cells of a mesh, drawn as prism wireframes
#[derive(Debug, Parser)]
#[command(name = BINARY, version, long_about = None)]
struct Cli {
    /// Space-time mesh (.p21)
    input: Option<PathBuf>,

    #[command(flatten)]
    display: DisplayArgs,
}

fn run(cli: Cli) -> Result<(), Error> {
    let input = cli::input(cli.input.clone())?;
    let mesh: SpaceTimeMesh = cli::load(&input)?;
    tracing::info!(prisms = mesh.prisms.len(), skipped = mesh.skipped, "space-time mesh loaded");

    let mut surface = cli.display.surface(&input);
    surface.draw(&Figure::Wireframe(WireframeFigure::new(&mesh)))?;
    surface.show()?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_tracing(cli.display.verbose);

    cli::finish(BINARY, SpaceTimeMesh::EXTENSION, run(cli))
}
