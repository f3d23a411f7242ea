use super::error::Error;
use super::render::{DocumentWriter, Mode, SvgSurface, Template};

use clap::Args;
use dumps::Dump;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Drawing options shared by every binary
#[derive(Debug, Clone, Args)]
pub struct DisplayArgs {
    /// Where figures are drawn [default: <temp dir>/fem_viz]
    #[arg(long, value_name = "DIR")]
    pub figures_dir: Option<PathBuf>,

    /// Don't wait for the figures to be dismissed
    #[arg(long)]
    pub no_wait: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl DisplayArgs {
    /// A surface drawing into the figures directory, with files named after `input`
    pub fn surface(&self, input: &Path) -> SvgSurface {
        let dir = self
            .figures_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("fem_viz"));
        let surface = SvgSurface::new(dir, file_stem(input));

        if self.no_wait {
            surface.without_wait()
        } else {
            surface
        }
    }
}

/// Options of the binaries which can also write a TikZ document
#[derive(Debug, Clone, Args)]
pub struct DocumentArgs {
    /// Write a TikZ document instead of drawing figures
    #[arg(long)]
    pub tikz: bool,

    /// Template to substitute into, instead of the built-in one
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Where documents are written
    #[arg(long, value_name = "DIR", default_value = "output")]
    pub output_dir: PathBuf,
}

impl DocumentArgs {
    pub fn mode(&self) -> Mode {
        if self.tikz {
            Mode::Document
        } else {
            Mode::Interactive
        }
    }

    /// The `--template` file, or `built_in`
    pub fn template(&self, built_in: fn() -> Template) -> Result<Template, Error> {
        match &self.template {
            Some(path) => Ok(Template::from_file(path)?),
            None => Ok(built_in()),
        }
    }

    pub fn writer(&self) -> DocumentWriter {
        DocumentWriter::new(&self.output_dir)
    }
}

/// File name of `path` without its extension
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("figure"))
}

/// Log to stderr, filtered by `RUST_LOG` (`warn` by default, `info` with `verbose`)
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // a subscriber may already be installed (e.g. by a test harness)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// The positional input path, or [Error::Usage] if it was omitted
pub fn input(path: Option<PathBuf>) -> Result<PathBuf, Error> {
    path.ok_or(Error::Usage)
}

/// Load a dump, classifying failures for the exit status
pub fn load<D: Dump>(path: &Path) -> Result<D, Error> {
    D::from_file(path).map_err(|err| Error::load(D::EXTENSION, err))
}

/// Report the outcome of a binary and produce its exit code
pub fn finish(binary: &str, extension: &str, result: Result<(), Error>) -> ExitCode {
    let err = match result {
        Ok(()) => return ExitCode::SUCCESS,
        Err(err) => err,
    };

    if err.is_fatal() {
        if let Error::FileNotFound { path } = &err {
            tracing::debug!(path = %path.display(), "input does not exist");
            eprintln!("File not found.");
        } else {
            eprintln!("{}", err);
        }
    } else if let Error::Usage = err {
        println!("Usage: {} /path/to/file.{}.", binary, extension);
    } else {
        tracing::info!("display interrupted");
    }

    err.exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Cli {
        input: Option<PathBuf>,

        #[command(flatten)]
        document: DocumentArgs,

        #[command(flatten)]
        display: DisplayArgs,
    }

    #[derive(Debug, Parser)]
    struct FiguresOnly {
        input: Option<PathBuf>,

        #[command(flatten)]
        display: DisplayArgs,
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["poly2", "mesh.p2"]).unwrap();

        assert_eq!(cli.input, Some(PathBuf::from("mesh.p2")));
        assert_eq!(cli.document.mode(), Mode::Interactive);
        assert_eq!(cli.document.output_dir, PathBuf::from("output"));
        assert!(cli.document.template.is_none());
        assert_eq!(cli.document.template(Template::mesh).unwrap(), Template::mesh());
        assert!(!cli.display.no_wait);
    }

    #[test]
    fn document_mode() {
        let cli = Cli::try_parse_from(["poly2", "--tikz", "--output-dir", "tex", "-v", "mesh.p2"]).unwrap();

        assert_eq!(cli.document.mode(), Mode::Document);
        assert_eq!(cli.document.writer().dir(), Path::new("tex"));
        assert!(cli.display.verbose);
    }

    #[test]
    fn document_options_are_rejected_without_a_document_form() {
        for args in [
            ["poly21", "--tikz", "mesh.p21"],
            ["poly21", "--output-dir", "tex"],
            ["visual21", "--template", "a.tex"],
        ] {
            let err = FiguresOnly::try_parse_from(args).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
        }

        let cli = FiguresOnly::try_parse_from(["poly21", "--no-wait", "mesh.p21"]).unwrap();
        assert!(cli.display.no_wait);
    }

    #[test]
    fn missing_input_is_a_usage_error() {
        let cli = Cli::try_parse_from(["poly2"]).unwrap();
        assert!(matches!(input(cli.input), Err(Error::Usage)));
        assert_eq!(file_stem(Path::new("runs/thConvergence_1_1.e21")), "thConvergence_1_1");
    }
}
