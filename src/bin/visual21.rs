use clap::Parser;
use fem_viz::cli::{self, DisplayArgs};
use fem_viz::render::figure::ScatterFigure;
use fem_viz::{Dump, Error, Figure, SolutionSamples, Surface};
use std::path::PathBuf;
use std::process::ExitCode;

const BINARY: &str = "visual21";

/// Pointwise solution samples in space-time, coloured by value
#[derive(Debug, Parser)]
#[command(name = BINARY, version, long_about = None)]
struct Cli {
    /// Solution samples (.s21)
    input: Option<PathBuf>,

    #[command(flatten)]
    display: DisplayArgs,
}

fn run(cli: Cli) -> Result<(), Error> {
    let input = cli::input(cli.input.clone())?;
    let samples: SolutionSamples = cli::load(&input)?;

    if let Some([min, max]) = samples.value_range() {
        tracing::info!(samples = samples.samples.len(), min, max, "solution samples loaded");
    }

    let mut surface = cli.display.surface(&input);
    surface.draw(&Figure::Scatter(ScatterFigure::new(&samples)))?;
    surface.show()?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_tracing(cli.display.verbose);

    cli::finish(BINARY, SolutionSamples::EXTENSION, run(cli))
}
