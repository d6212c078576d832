use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod errors;
pub mod functions;
pub mod parsing;
pub mod structs;
pub mod utils;


use errors::AnalyzeError;
use functions::{analyze, AnalysisReport, JsonReporter, TextReporter};
use parsing::read_trades_file;
use structs::{Config, OutputFormat};

/// Realized FIFO gains per currency from an exchange trades export
#[derive(Parser, Debug)]
struct Cli {
    /// Exported .csv file from kraken
    #[arg(value_name = "CSV_FILE", value_parser = utils::existing_file)]
    file: String,
}

fn run(cli: &Cli) -> Result<AnalysisReport, AnalyzeError> {
    let config = Config::from_env()?;
    let trades = read_trades_file(&cli.file, &config.known_currencies)?;
    match config.output {
        OutputFormat::Text => analyze(trades, &config, &mut TextReporter::new(io::stdout().lock())),
        OutputFormat::Json => analyze(trades, &config, &mut JsonReporter::new(io::stdout().lock())),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if e.is_malformed_input() => {
            tracing::debug!("{e}");
            eprintln!("Invalid input file.");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
