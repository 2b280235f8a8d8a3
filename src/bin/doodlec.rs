//! `doodlec`: compile a doodle source for a grid and print the result.
//!
//! ```text
//! doodlec pattern.doodle --grid 5x5 --seed 7 --format css
//! cat pattern.doodle | doodlec --grid 8 --format json
//! ```

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use cell_doodle::document;
use cell_doodle::{Compiler, CompilerConfig, Error, GridSize};
use clap::{Parser, ValueEnum};
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "doodlec")]
#[command(version)]
#[command(about = "Compile a doodle source into per-cell stylesheets")]
struct Cli {
    /// Input file (reads stdin if not provided)
    file: Option<PathBuf>,

    /// Grid size: `5`, `3x4`, `3,4`
    #[arg(long, short, default_value = "1")]
    grid: String,

    /// Seed for reproducible random output
    #[arg(long, short)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, short, default_value = "css", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Keyframes, host and cell styles as one stylesheet
    Css,
    /// Flags and the three stylesheets as JSON
    Json,
    /// Shadow markup for a host element
    Html,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::warn!(error = %e, "compile failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String, Error> {
    let source = read_input(cli.file.as_ref())?;
    let grid = GridSize::parse(&cli.grid);

    let mut config = CompilerConfig::new();
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let output = Compiler::new(config).compile(&source, grid)?;

    Ok(match cli.format {
        OutputFormat::Css => output.to_css(),
        OutputFormat::Json => serde_json::json!({
            "grid": grid,
            "flags": output.flags,
            "stylesheets": output.stylesheets,
        })
        .to_string(),
        OutputFormat::Html => document::render(&output, grid).to_html(),
    })
}

fn read_input(file: Option<&PathBuf>) -> Result<String, Error> {
    match file {
        Some(path) => std::fs::read_to_string(path).map_err(|e| Error::io(path, e)),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| Error::io("<stdin>", e))?;
            Ok(source)
        }
    }
}
